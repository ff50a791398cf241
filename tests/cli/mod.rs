mod generate_contracts;
mod output_contracts;
mod parse_matrix;
pub(crate) mod support;
