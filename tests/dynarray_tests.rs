use arraykit::{ArrayError, DynArray, DEFAULT_CAPACITY};

#[test]
fn test_new_array_is_empty_with_default_capacity() {
    let array: DynArray<i32> = DynArray::new().unwrap();

    assert_eq!(array.len(), 0);
    assert!(array.is_empty());
    assert_eq!(array.capacity(), DEFAULT_CAPACITY);
}

#[test]
fn test_growth_from_default_capacity() {
    let mut array = DynArray::new().unwrap();
    for i in 0..10 {
        array.push_back(i).unwrap();
    }
    assert_eq!(array.capacity(), 10);

    array.push_back(10).unwrap();
    assert_eq!(array.len(), 11);
    assert_eq!(array.capacity(), 15);
    for i in 0..11 {
        assert_eq!(array[i], i);
    }
}

#[test]
fn test_growth_from_zero_capacity() {
    let mut array = DynArray::with_capacity(0).unwrap();
    assert_eq!(array.capacity(), 0);

    let mut capacities = Vec::new();
    for i in 0..6 {
        array.push_back(i).unwrap();
        capacities.push(array.capacity());
    }
    assert_eq!(capacities, [1, 2, 3, 5, 5, 8]);
}

#[test]
fn test_size_never_exceeds_capacity() {
    let mut array = DynArray::with_capacity(1).unwrap();
    for i in 0..200 {
        array.push_back(i).unwrap();
        assert!(array.len() <= array.capacity());
    }
}

#[test]
fn test_sized_constructors() {
    let defaults: DynArray<i32> = DynArray::with_len(4).unwrap();
    assert_eq!(defaults, [0, 0, 0, 0]);
    assert_eq!(defaults.capacity(), 6);

    let copies = DynArray::from_elem(3, "x").unwrap();
    assert_eq!(copies, ["x", "x", "x"]);
    assert_eq!(copies.capacity(), 5);

    let empty: DynArray<u8> = DynArray::from_elem(0, 1).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.capacity(), 0);
}

#[test]
fn test_from_slice_and_iter() {
    let from_slice = DynArray::from_slice(&[1, 2, 3]).unwrap();
    assert_eq!(from_slice.as_slice(), &[1, 2, 3]);
    assert_eq!(from_slice.capacity(), 5);

    let from_iter = DynArray::try_from_iter(0..4).unwrap();
    assert_eq!(from_iter, [0, 1, 2, 3]);
    assert_eq!(from_iter.capacity(), 6);
}

#[test]
fn test_from_cursor_range() {
    let source = DynArray::from_slice(&[1, 2, 3, 4]).unwrap();

    let tail = DynArray::from_range(source.begin() + 1, source.end()).unwrap();
    assert_eq!(tail, [2, 3, 4]);

    let reversed = DynArray::from_range(source.rbegin(), source.rend()).unwrap();
    assert_eq!(reversed, [4, 3, 2, 1]);

    let empty = DynArray::from_range(source.end(), source.begin()).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_checked_access() {
    let mut array = DynArray::from_slice(&[10, 20, 30]).unwrap();

    assert_eq!(array.at(0), Ok(&10));
    assert_eq!(array.at(3), Err(ArrayError::OutOfRange { index: 3, len: 3 }));

    *array.at_mut(1).unwrap() = 21;
    assert_eq!(array[1], 21);
    assert!(array.at_mut(7).is_err());

    assert_eq!(array.get(2), Some(&30));
    assert_eq!(array.get(3), None);
}

#[test]
fn test_unchecked_access() {
    let mut array = DynArray::from_slice(&[5, 6, 7]).unwrap();

    let value = unsafe { *array.get_unchecked(2) };
    assert_eq!(value, 7);

    unsafe { *array.get_unchecked_mut(0) = 50 };
    assert_eq!(array[0], 50);
}

#[test]
#[should_panic]
fn test_index_out_of_range_panics() {
    let array = DynArray::from_slice(&[1, 2]).unwrap();
    let _value = array[2];
}

#[test]
fn test_front_and_back() {
    let mut array = DynArray::new().unwrap();
    assert_eq!(array.front(), None);
    assert_eq!(array.back(), None);

    array.push_back(1).unwrap();
    array.push_back(2).unwrap();
    assert_eq!(array.front(), Some(&1));
    assert_eq!(array.back(), Some(&2));

    *array.front_mut().unwrap() = 10;
    *array.back_mut().unwrap() = 20;
    assert_eq!(array, [10, 20]);
}

#[test]
fn test_pop_back() {
    let mut array = DynArray::from_slice(&["a", "b"]).unwrap();

    assert_eq!(array.pop_back(), Some("b"));
    assert_eq!(array.pop_back(), Some("a"));
    assert_eq!(array.pop_back(), None);
    assert_eq!(array.capacity(), 3);
}

#[test]
fn test_emplace_back_returns_new_element() {
    let mut array = DynArray::new().unwrap();
    array.push_back(String::from("first")).unwrap();

    let second = array.emplace_back(|| String::from("sec")).unwrap();
    second.push_str("ond");

    assert_eq!(array.back().map(String::as_str), Some("second"));
    assert_eq!(array.len(), 2);
}

#[test]
fn test_insert_shifts_trailing_elements() {
    let mut array = DynArray::from_slice(&[1, 2, 3]).unwrap();

    let cursor = array.insert(0, 7).unwrap();
    assert_eq!(cursor.get(), Some(&7));
    assert_eq!(array, [7, 1, 2, 3]);

    array.insert(1, 19).unwrap();
    assert_eq!(array, [7, 19, 1, 2, 3]);

    array.insert(5, 42).unwrap();
    assert_eq!(array, [7, 19, 1, 2, 3, 42]);
}

#[test]
fn test_insert_past_end_is_rejected() {
    let mut array = DynArray::from_slice(&[1, 2]).unwrap();

    let err = array.insert(3, 9).unwrap_err();
    assert_eq!(err, ArrayError::OutOfRange { index: 3, len: 2 });
    assert_eq!(array, [1, 2]);
}

#[test]
fn test_insert_into_full_array_grows() {
    let mut array = DynArray::with_capacity(2).unwrap();
    array.push_back(1).unwrap();
    array.push_back(3).unwrap();

    array.insert(1, 2).unwrap();
    assert_eq!(array, [1, 2, 3]);
    assert_eq!(array.capacity(), 3);
}

#[test]
fn test_insert_slice() {
    let mut array = DynArray::from_slice(&[1, 2, 3]).unwrap();
    assert_eq!(array.capacity(), 5);

    let cursor = array.insert_slice(1, &[8, 9, 10]).unwrap();
    assert_eq!(cursor.get(), Some(&8));
    assert_eq!(array, [1, 8, 9, 10, 2, 3]);
    assert_eq!(array.capacity(), 9);
}

#[test]
fn test_insert_slice_within_capacity() {
    let mut array = DynArray::with_capacity(10).unwrap();
    array.push_back('a').unwrap();
    array.push_back('d').unwrap();

    array.insert_slice(1, &['b', 'c']).unwrap();
    assert_eq!(array, ['a', 'b', 'c', 'd']);
    assert_eq!(array.capacity(), 10);
}

#[test]
fn test_insert_fill_and_iter() {
    let mut array = DynArray::from_slice(&[1, 5]).unwrap();

    array.insert_fill(1, 3, 0).unwrap();
    assert_eq!(array, [1, 0, 0, 0, 5]);

    array.insert_iter(5, 6..8).unwrap();
    assert_eq!(array, [1, 0, 0, 0, 5, 6, 7]);

    array.insert_iter(0, core::iter::empty()).unwrap();
    assert_eq!(array.len(), 7);
}

#[test]
fn test_erase() {
    let mut array = DynArray::from_slice(&[1, 2, 3, 4]).unwrap();

    assert_eq!(array.erase(1), Ok(2));
    assert_eq!(array, [1, 3, 4]);
    assert_eq!(array.erase(2), Ok(4));
    assert_eq!(array, [1, 3]);
    assert_eq!(array.erase(2), Err(ArrayError::OutOfRange { index: 2, len: 2 }));
}

#[test]
fn test_erase_range() {
    let mut array = DynArray::try_from_iter(0..8).unwrap();

    array.erase_range(2, 5).unwrap();
    assert_eq!(array, [0, 1, 5, 6, 7]);

    array.erase_range(3, 3).unwrap();
    assert_eq!(array.len(), 5);

    assert_eq!(array.erase_range(4, 2), Err(ArrayError::InvalidRange { start: 4, end: 2 }));
    assert_eq!(array.erase_range(0, 6), Err(ArrayError::OutOfRange { index: 6, len: 5 }));

    array.erase_range(0, 5).unwrap();
    assert!(array.is_empty());
}

#[test]
fn test_reserve_only_grows() {
    let mut array: DynArray<u64> = DynArray::new().unwrap();

    array.reserve(4).unwrap();
    assert_eq!(array.capacity(), 10);

    array.reserve(20).unwrap();
    assert_eq!(array.capacity(), 20);
}

#[test]
fn test_reserve_preserves_contents() {
    let mut array = DynArray::from_slice(&["x", "y"]).unwrap();
    array.reserve(100).unwrap();

    assert_eq!(array, ["x", "y"]);
    assert_eq!(array.capacity(), 100);
}

#[test]
fn test_shrink_to_fit() {
    let mut array = DynArray::from_slice(&[1, 2, 3]).unwrap();
    array.shrink_to_fit().unwrap();
    assert_eq!(array.capacity(), 3);
    assert_eq!(array, [1, 2, 3]);

    array.clear();
    array.shrink_to_fit().unwrap();
    assert_eq!(array.capacity(), 0);

    array.push_back(4).unwrap();
    assert_eq!(array.capacity(), 1);
}

#[test]
fn test_resize() {
    let mut array = DynArray::from_slice(&[1, 2, 3]).unwrap();

    array.resize(8, 0).unwrap();
    assert_eq!(array, [1, 2, 3, 0, 0, 0, 0, 0]);
    assert_eq!(array.capacity(), 8);

    array.resize(2, 9).unwrap();
    assert_eq!(array, [1, 2]);
    assert_eq!(array.capacity(), 8);

    array.resize(4, 9).unwrap();
    assert_eq!(array, [1, 2, 9, 9]);
    assert_eq!(array.capacity(), 8);
}

#[test]
fn test_resize_default_and_with() {
    let mut array: DynArray<String> = DynArray::new().unwrap();
    array.resize_default(2).unwrap();
    assert_eq!(array, [String::new(), String::new()]);

    let mut counter = 0;
    let mut numbers = DynArray::new().unwrap();
    numbers
        .resize_with(3, || {
            counter += 1;
            counter
        })
        .unwrap();
    assert_eq!(numbers, [1, 2, 3]);
}

#[test]
fn test_truncate() {
    let mut array = DynArray::from_slice(&[1, 2, 3, 4]).unwrap();

    array.truncate(10);
    assert_eq!(array.len(), 4);

    array.truncate(1);
    assert_eq!(array, [1]);
}

#[test]
fn test_assign_reuses_buffer_when_it_fits() {
    let mut array = DynArray::from_slice(&[1, 2, 3]).unwrap();
    assert_eq!(array.capacity(), 5);

    array.assign_fill(4, 7).unwrap();
    assert_eq!(array, [7, 7, 7, 7]);
    assert_eq!(array.capacity(), 5);

    array.assign_slice(&[9]).unwrap();
    assert_eq!(array, [9]);
    assert_eq!(array.capacity(), 5);
}

#[test]
fn test_assign_reallocates_when_too_small() {
    let mut array = DynArray::from_slice(&[1, 2, 3]).unwrap();

    array.assign_fill(6, 1).unwrap();
    assert_eq!(array, [1, 1, 1, 1, 1, 1]);
    assert_eq!(array.capacity(), 9);

    array.assign_iter(0..10).unwrap();
    assert_eq!(array, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(array.capacity(), 15);
}

#[test]
fn test_swap_exchanges_everything() {
    let mut a = DynArray::from_slice(&[1, 2, 3]).unwrap();
    let mut b = DynArray::with_capacity(20).unwrap();
    b.push_back(9).unwrap();

    a.swap(&mut b);

    assert_eq!(a, [9]);
    assert_eq!(a.capacity(), 20);
    assert_eq!(b, [1, 2, 3]);
    assert_eq!(b.capacity(), 5);
}

#[test]
fn test_clear_keeps_capacity() {
    let mut array = DynArray::try_from_iter(0..30).unwrap();
    let capacity = array.capacity();

    array.clear();
    assert!(array.is_empty());
    assert_eq!(array.capacity(), capacity);

    array.push_back(1).unwrap();
    assert_eq!(array, [1]);
}

#[test]
fn test_take_leaves_source_empty() {
    let mut source = DynArray::from_slice(&[1, 2, 3]).unwrap();

    let taken = source.take();

    assert_eq!(taken, [1, 2, 3]);
    assert_eq!(taken.capacity(), 5);
    assert_eq!(source.len(), 0);
    assert_eq!(source.capacity(), 0);

    // The emptied source is still usable.
    source.assign_slice(&[4, 5]).unwrap();
    assert_eq!(source, [4, 5]);
}

#[test]
fn test_move_by_value() {
    let a = DynArray::from_slice(&[String::from("a"), String::from("b")]).unwrap();
    let b = a;
    assert_eq!(b.len(), 2);
    assert_eq!(b[1], "b");
}

#[test]
fn test_clone_is_independent() {
    let original = DynArray::from_slice(&[1, 2, 3]).unwrap();
    let mut copy = original.clone();

    assert_eq!(copy, original);
    assert_eq!(copy.capacity(), original.capacity());

    copy[0] = 100;
    copy.push_back(4).unwrap();
    assert_eq!(original, [1, 2, 3]);
    assert_eq!(copy, [100, 2, 3, 4]);

    let again = original.try_clone().unwrap();
    assert_eq!(again, original);
}

#[test]
fn test_max_size() {
    let words: DynArray<u32> = DynArray::new().unwrap();
    assert_eq!(words.max_size(), isize::MAX as usize / 4);

    let units: DynArray<()> = DynArray::new().unwrap();
    assert_eq!(units.max_size(), usize::MAX);
}

#[test]
fn test_zero_sized_elements() {
    let mut units = DynArray::new().unwrap();
    for _ in 0..100 {
        units.push_back(()).unwrap();
    }
    assert_eq!(units.len(), 100);
    assert_eq!(units.pop_back(), Some(()));
    assert_eq!(units.iter().count(), 99);
}

#[test]
fn test_extend_and_collect() {
    let mut array: DynArray<i32> = (0..25).collect();
    assert_eq!(array.len(), 25);
    assert_eq!(array.capacity(), 35);

    array.extend([25, 26]);
    array.extend(&[27, 28]);
    assert_eq!(array.len(), 29);
    assert_eq!(array.back(), Some(&28));
}

#[test]
fn test_equality_and_debug() {
    let a = DynArray::from_slice(&[1, 2, 3]).unwrap();
    let b = DynArray::try_from_iter([1, 2, 3]).unwrap();

    assert_eq!(a, b);
    assert_eq!(a, [1, 2, 3]);
    let slice: &[i32] = a.as_ref();
    assert_eq!(slice, &[1, 2, 3]);
    assert_eq!(format!("{a:?}"), "[1, 2, 3]");
}

#[test]
fn test_default_array() {
    let array: DynArray<char> = DynArray::default();
    assert!(array.is_empty());
    assert_eq!(array.capacity(), DEFAULT_CAPACITY);
}
