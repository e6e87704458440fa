//! Comparators score how close a student's output is to the reference output.

pub mod similarity_comparator;
