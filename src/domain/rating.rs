use serde::Serialize;

const MIN: i16 = 1;
const MAX: i16 = 5;

/// A testimonial star rating, guaranteed to be within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rating(i16);

impl Rating {
    pub fn as_i16(&self) -> i16 {
        self.0
    }
}

impl TryFrom<i16> for Rating {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        if !(MIN..=MAX).contains(&value) {
            return Err(format!("Rating must be between {} and {}", MIN, MAX));
        }
        Ok(Self(value))
    }
}
