/// Trait for display outputs that can be switched at runtime.
pub trait DisplayControl {
    /// Error type for control operations.
    type Error;

    /// Commit the pending configuration and enable output.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Disable output.
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Switch the built-in test pattern on or off.
    fn pattern(&mut self, on: bool) -> Result<(), Self::Error>;
}
