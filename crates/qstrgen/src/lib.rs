pub mod charname;
pub mod cli;
pub mod emit;
pub mod hash;
pub mod parse;
