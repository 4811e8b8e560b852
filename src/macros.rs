/// Builds a [`DynArray`](crate::DynArray) from a list of elements, or from
/// one element and a count. Evaluates to a `Result`, like the constructors it
/// expands to.
///
/// ```
/// # use arraykit::{dyn_array, DynArray};
/// let empty: DynArray<u8> = dyn_array![].unwrap();
/// assert!(empty.is_empty());
/// assert_eq!(empty.capacity(), 10);
///
/// let zeros = dyn_array![0u32; 4].unwrap();
/// assert_eq!(zeros, [0, 0, 0, 0]);
///
/// let words = dyn_array!["alpha", "beta"].unwrap();
/// assert_eq!(words.len(), 2);
/// assert_eq!(words.capacity(), 3);
/// ```
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynArray::from_elem($n, $elem)
    };
    ($($item:expr),+ $(,)?) => {
        $crate::DynArray::try_from_iter([$($item),+])
    };
}
