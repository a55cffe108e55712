/// Assert that two floats agree within a small absolute-or-relative tolerance.
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $msg:expr) => {{
        let left: f64 = $left;
        let right: f64 = $right;
        let tolerance = 1e-9_f64.max(1e-9 * left.abs().max(right.abs()));
        assert!(
            (left - right).abs() <= tolerance,
            "{}: {} vs {}",
            $msg,
            left,
            right
        );
    }};
}
