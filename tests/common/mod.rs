#![allow(dead_code)]

pub mod budget_alloc;
pub mod corpus;
pub mod measure;
