mod helper;

mod notes;
