//! Fuzz testing for offset vector operations.
//!
//! This fuzz target drives an OffsetVec and a plain Vec model through the
//! same operation sequence and checks that every element is reachable at
//! `base + position` and nowhere else. Elements are heap strings so that
//! double drops and leaks show up under the sanitizer.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use basevec::{ArrayError, OffsetVec};

#[derive(Debug, Arbitrary)]
struct VecInput {
    base: i16,
    initial_length: u8,
    operations: Vec<VecOperation>,
}

#[derive(Debug, Arbitrary)]
enum VecOperation {
    Push(u16),
    Pop,
    Set(i16, u16),
    Get(i16),
    Swap(i16, i16),
    Truncate(u8),
    Clear,
    ShrinkToFit,
    Reserve(u8),
    Rebase(i16),
}

fuzz_target!(|input: VecInput| {
    if input.operations.len() > 1000 {
        return;
    }

    let mut base = input.base as isize;
    let mut model: Vec<String> = vec![String::new(); input.initial_length as usize];
    let mut vec = OffsetVec::<String>::create(base, input.initial_length as usize).unwrap();

    for op in &input.operations {
        match op {
            VecOperation::Push(v) => {
                vec.push(v.to_string()).unwrap();
                model.push(v.to_string());
            }
            VecOperation::Pop => {
                assert_eq!(vec.pop(), model.pop());
            }
            VecOperation::Set(i, v) => {
                let i = *i as isize;
                let pos = i - base;
                match vec.set(i, v.to_string()) {
                    Ok(old) => {
                        assert!(pos >= 0 && (pos as usize) < model.len());
                        let expected = std::mem::replace(&mut model[pos as usize], v.to_string());
                        assert_eq!(old, expected);
                    }
                    Err(err) => {
                        assert!(matches!(err, ArrayError::IndexOutOfRange { .. }));
                        assert!(pos < 0 || pos as usize >= model.len());
                    }
                }
            }
            VecOperation::Get(i) => {
                let i = *i as isize;
                let pos = i - base;
                let expected = if pos >= 0 { model.get(pos as usize) } else { None };
                assert_eq!(vec.get(i).ok(), expected);
            }
            VecOperation::Swap(a, b) => {
                let (a, b) = (*a as isize, *b as isize);
                let (pa, pb) = (a - base, b - base);
                let valid = |p: isize| p >= 0 && (p as usize) < model.len();
                match vec.swap(a, b) {
                    Ok(()) => {
                        assert!(valid(pa) && valid(pb));
                        model.swap(pa as usize, pb as usize);
                    }
                    Err(_) => assert!(!valid(pa) || !valid(pb)),
                }
            }
            VecOperation::Truncate(n) => {
                vec.truncate(*n as usize);
                model.truncate(*n as usize);
            }
            VecOperation::Clear => {
                vec.clear();
                model.clear();
            }
            VecOperation::ShrinkToFit => {
                vec.shrink_to_fit().unwrap();
                assert_eq!(vec.capacity(), vec.len());
            }
            VecOperation::Reserve(n) => {
                vec.reserve(*n as usize).unwrap();
                assert!(vec.capacity() >= vec.len() + *n as usize);
            }
            VecOperation::Rebase(b) => {
                base = *b as isize;
                vec.rebase(base).unwrap();
            }
        }

        assert_eq!(vec.len(), model.len());
        assert_eq!(vec.first_index(), base);
        assert!(vec.capacity() >= vec.len());
    }

    assert_eq!(vec.as_slice(), model.as_slice());
    for (k, i) in vec.indices().enumerate() {
        assert_eq!(vec[i], model[k]);
    }
    assert!(vec.get(base - 1).is_err());
    assert!(vec.get(vec.end_index()).is_err());
    assert_eq!(vec.into_vec(), model);
});
