use crate::errors::ThttpResult;

pub trait Validate {
    fn validate(&self) -> ThttpResult<()>;
}
