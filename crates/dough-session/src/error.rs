use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown field '{0}' (try: {fields})", fields = crate::edit::Field::NAMES.join(", "))]
    UnknownField(String),

    #[error(transparent)]
    Calc(#[from] dough_calc::CalcError),

    #[error(transparent)]
    Store(#[from] dough_store::StoreError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
