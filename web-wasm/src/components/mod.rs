pub mod alert;
pub mod checklist_modal;
pub mod checklist_row;
