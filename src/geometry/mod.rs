pub(crate) mod ternary;
