pub mod card;
pub mod games;
