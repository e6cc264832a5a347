pub mod debt_form;
pub mod hints;
pub mod toast;
