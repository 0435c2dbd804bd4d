pub mod day;
pub mod delete;
pub mod edit;
pub mod links;
pub mod month;
pub mod search;
pub mod upcoming;
