pub mod auditor;
pub mod cover_letter;
pub mod decode;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod rewriter;
pub mod tone;
pub mod verbs;
