pub mod differ;
pub mod normalize;
pub mod report;
pub mod search;
