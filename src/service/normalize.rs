/// Canonicalize free text for substring matching: lowercase, trim, and
/// collapse whitespace runs to single spaces. Total for any input.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("  UBER Trip 123  "), "uber trip 123");
    }

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(normalize("PAG\t *Boleto   IFOOD"), "pag *boleto ifood");
    }

    #[test]
    fn empty_and_blank_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
    }
}
