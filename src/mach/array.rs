use super::Val;
use crate::error;
use crate::lang::{Error, VarType};

type Result<T> = std::result::Result<T, Error>;

/// Largest element count a single DIM may allocate.
const MAX_ELEMENTS: usize = 1 << 24;

/// ## Dense row-major array
///
/// Bounds are inclusive upper bounds: `DIM A(10)` holds 11 elements.

#[derive(Debug, Clone)]
pub struct Array {
    var_type: VarType,
    bounds: Vec<usize>,
    vals: Vec<Val>,
}

impl Array {
    pub fn new(var_type: VarType, bounds: Vec<usize>) -> Result<Array> {
        let mut len: usize = 1;
        for bound in &bounds {
            len = match bound.checked_add(1).and_then(|n| len.checked_mul(n)) {
                Some(n) if n <= MAX_ELEMENTS => n,
                _ => return Err(error!(RuntimeError; "OUT OF MEMORY")),
            };
        }
        Ok(Array {
            var_type,
            bounds,
            vals: vec![Val::default_for(var_type); len],
        })
    }

    pub fn get(&self, indices: &[i64]) -> Result<Val> {
        let offset = self.offset(indices)?;
        Ok(self.vals[offset].clone())
    }

    pub fn set(&mut self, indices: &[i64], val: Val) -> Result<()> {
        let offset = self.offset(indices)?;
        self.vals[offset] = val.coerce_to(self.var_type)?;
        Ok(())
    }

    fn offset(&self, indices: &[i64]) -> Result<usize> {
        if indices.len() != self.bounds.len() {
            return Err(error!(MismatchedArrayDimensions));
        }
        let mut offset = 0;
        for (index, bound) in indices.iter().zip(&self.bounds) {
            if *index < 0 || *index as u64 > *bound as u64 {
                return Err(error!(OutOfArrayBounds));
            }
            offset = offset * (bound + 1) + *index as usize;
        }
        Ok(offset)
    }
}
