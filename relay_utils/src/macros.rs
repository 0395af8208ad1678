#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables)]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn matches() {
        assert_matches!(Some(7), Some(_));
        assert_matches!(Some(7), Some(x) if *x == 7);
    }

    #[test]
    #[should_panic = "did not match pattern"]
    fn does_not_match() {
        assert_matches!(None::<i32>, Some(_));
    }
}
