pub mod header;
pub mod passport_form;
pub mod passport_wall;
pub mod preview_card;
