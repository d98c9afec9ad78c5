pub mod admin;
pub mod ajax;
pub mod front_end;
