/// A code (in the coding theory sense).
pub trait Code {
    /// The input length of this code's encoder. In other words, the dimension of the code.
    fn message_len(&self) -> usize;

    fn codeword_len(&self) -> usize;

    /// The number of redundant symbols per codeword.
    fn redundancy(&self) -> usize {
        self.codeword_len() - self.message_len()
    }
}
