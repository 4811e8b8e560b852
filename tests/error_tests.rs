use arraykit::{ArrayError, DynArray};

#[test]
fn test_error_messages() {
    let out_of_range = ArrayError::OutOfRange { index: 4, len: 2 };
    assert_eq!(out_of_range.to_string(), "Index out of range: index 4 is beyond length 2");

    let overflow = ArrayError::CapacityOverflow { requested: 7 };
    assert_eq!(overflow.to_string(), "Capacity overflow: 7 elements cannot be allocated");

    let failed = ArrayError::AllocFailed { size: 64, align: 8 };
    assert_eq!(failed.to_string(), "Allocation failed: 64 bytes with alignment 8");

    let invalid = ArrayError::InvalidRange { start: 3, end: 1 };
    assert_eq!(invalid.to_string(), "Invalid range: start 3 is after end 1");
}

#[test]
fn test_error_is_std_error() {
    let err = ArrayError::OutOfRange { index: 0, len: 0 };
    let dyn_err: &dyn std::error::Error = &err;

    assert!(dyn_err.source().is_none());
}

#[test]
fn test_checked_access_on_empty_array() {
    let array: DynArray<i32> = DynArray::new().unwrap();

    assert_eq!(array.at(0), Err(ArrayError::OutOfRange { index: 0, len: 0 }));
}

#[test]
fn test_capacity_overflow_is_reported() {
    let err = DynArray::<u64>::with_capacity(usize::MAX).unwrap_err();
    assert_eq!(err, ArrayError::CapacityOverflow { requested: usize::MAX });

    let err = DynArray::<u8>::with_len(usize::MAX).unwrap_err();
    assert_eq!(err, ArrayError::CapacityOverflow { requested: usize::MAX });
}

#[test]
fn test_reserve_overflow_leaves_array_intact() {
    let mut array = DynArray::from_slice(&[1u32, 2]).unwrap();

    let err = array.reserve(usize::MAX).unwrap_err();
    assert!(matches!(err, ArrayError::CapacityOverflow { .. }));
    assert_eq!(array, [1, 2]);
    assert_eq!(array.capacity(), 3);
}

#[test]
fn test_error_propagates_with_question_mark() {
    fn second_element(array: &DynArray<&'static str>) -> Result<&'static str, ArrayError> {
        let value = array.at(1)?;
        Ok(*value)
    }

    let pair = DynArray::from_slice(&["left", "right"]).unwrap();
    assert_eq!(second_element(&pair), Ok("right"));

    let single = DynArray::from_slice(&["alone"]).unwrap();
    assert_eq!(second_element(&single), Err(ArrayError::OutOfRange { index: 1, len: 1 }));
}

#[test]
fn test_errors_are_cloneable_and_comparable() {
    let err = ArrayError::InvalidRange { start: 2, end: 0 };
    let copy = err.clone();

    assert_eq!(err, copy);
    assert_ne!(err, ArrayError::InvalidRange { start: 2, end: 1 });
    assert!(format!("{err:?}").contains("InvalidRange"));
}
