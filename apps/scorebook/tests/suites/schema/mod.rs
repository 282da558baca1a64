mod cascade;
mod column_types;
mod constraints;
