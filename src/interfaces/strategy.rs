use crate::quote::{Quote, QuoteError};
use crate::types::Price;

pub trait Policy {
    fn evaluate(&self, mid: Price) -> Result<Quote, QuoteError>;
}

impl<'a, P> Policy for &'a P
where
    P: Policy,
{
    fn evaluate(&self, mid: Price) -> Result<Quote, QuoteError> {
        (*self).evaluate(mid)
    }
}
