/// ## Machine configuration

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Random number seed. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Depth limit for GOSUB, FOR, and user function nesting.
    pub stack_limit: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            seed: None,
            stack_limit: u16::max_value() as usize,
        }
    }
}
