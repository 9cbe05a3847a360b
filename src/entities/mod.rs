pub mod donation_project;
pub mod donation_transaction;
pub mod sea_orm_active_enums;
