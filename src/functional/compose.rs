//! Function composition helpers
//!
//! `compose!(f1, f2, ..., fn)` builds a closure applying `fn` first and `f1`
//! last. `pipe!(x, f1, ..., fn)` feeds `x` through `f1` first and `fn` last.
//! Both accept any number of functions and any mix of types, as long as each
//! output type fits the next input.
//!
//! For chains of same-typed steps held in a collection, [`compose_all`] and
//! [`pipe_all`] do the same at runtime.

/// Compose functions right-to-left
///
/// ```
/// use finance_manager::compose;
///
/// let add_one = |x: i32| x + 1;
/// let double = |x: i32| x * 2;
/// let f = compose!(add_one, double);
/// assert_eq!(f(5), 11);
/// ```
#[macro_export]
macro_rules! compose {
    ($f:expr $(,)?) => {{
        let f = $f;
        move |x| f(x)
    }};
    ($f:expr, $($rest:expr),+ $(,)?) => {{
        let f = $f;
        let g = $crate::compose!($($rest),+);
        move |x| f(g(x))
    }};
}

/// Pipe a value through functions left-to-right
///
/// ```
/// use finance_manager::pipe;
///
/// let result = pipe!(5, |x: i32| x + 1, |x: i32| x * 2, |x: i32| x.to_string());
/// assert_eq!(result, "12");
/// ```
#[macro_export]
macro_rules! pipe {
    ($x:expr $(,)?) => { $x };
    ($x:expr, $f:expr $(, $rest:expr)* $(,)?) => {
        $crate::pipe!(($f)($x) $(, $rest)*)
    };
}

/// Compose two functions: `compose2(f, g)(x) == f(g(x))`
pub fn compose2<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C
where
    F: Fn(B) -> C,
    G: Fn(A) -> B,
{
    move |x| f(g(x))
}

/// Compose a list of same-typed steps right-to-left
///
/// An empty list yields the identity function.
pub fn compose_all<T>(steps: Vec<Box<dyn Fn(T) -> T>>) -> impl Fn(T) -> T {
    move |x| steps.iter().rev().fold(x, |acc, step| step(acc))
}

/// Pipe a value through a list of same-typed steps left-to-right
pub fn pipe_all<T>(value: T, steps: &[&dyn Fn(T) -> T]) -> T {
    steps.iter().fold(value, |acc, step| step(acc))
}
