mod executable_column;
mod validation;

pub use executable_column::ExecutableColumn;
pub use validation::Validator;
