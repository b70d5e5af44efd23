pub mod search_input;
