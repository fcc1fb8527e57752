pub mod assign;
pub mod contrast;
pub mod detect;
pub mod extract;
pub mod quantize;
