use std::collections::BTreeSet;

use form_spec::{Document, FieldInstance, FieldType};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert { id: u8, kind: usize, index: usize },
    Remove { id: u8 },
    Move { id: u8, index: usize },
    Select { id: u8 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12, 0usize..FieldType::ALL.len(), 0usize..16)
            .prop_map(|(id, kind, index)| Op::Insert { id, kind, index }),
        (0u8..12).prop_map(|id| Op::Remove { id }),
        (0u8..12, 0usize..16).prop_map(|(id, index)| Op::Move { id, index }),
        (0u8..12).prop_map(|id| Op::Select { id }),
    ]
}

fn key(id: u8) -> String {
    format!("el-{id}")
}

proptest! {
    #[test]
    fn ids_stay_unique_and_selection_stays_valid(ops in prop::collection::vec(op(), 0..64)) {
        let mut doc = Document::new();
        for op in ops {
            let before = doc.len();
            match op {
                Op::Insert { id, kind, index } => {
                    let instance = FieldType::ALL[kind].construct(&key(id));
                    let existed = doc.contains(&key(id));
                    match doc.insert(instance.clone(), index) {
                        Ok(at) => {
                            prop_assert!(!existed);
                            prop_assert_eq!(doc.len(), before + 1);
                            prop_assert_eq!(&doc.elements()[at], &instance);
                        }
                        Err(_) => {
                            prop_assert!(existed);
                            prop_assert_eq!(doc.len(), before);
                        }
                    }
                }
                Op::Remove { id } => {
                    let snapshot = doc.elements().to_vec();
                    match doc.remove(&key(id)) {
                        Some(_) => prop_assert_eq!(doc.len(), before - 1),
                        None => prop_assert_eq!(doc.elements(), snapshot.as_slice()),
                    }
                    let removed = key(id);
                    prop_assert_ne!(doc.selected(), Some(removed.as_str()));
                }
                Op::Move { id, index } => {
                    let _ = doc.move_to(&key(id), index);
                    prop_assert_eq!(doc.len(), before);
                }
                Op::Select { id } => {
                    let target = key(id);
                    let exists = doc.contains(&target);
                    prop_assert_eq!(doc.select(Some(target.as_str())).is_ok(), exists);
                }
            }

            let unique: BTreeSet<&str> = doc.elements().iter().map(FieldInstance::id).collect();
            prop_assert_eq!(unique.len(), doc.len());
            if let Some(selected) = doc.selected() {
                prop_assert!(doc.contains(selected));
            }
        }
    }

    #[test]
    fn insert_then_read_back(count in 0usize..8, index in 0usize..8) {
        let mut doc = Document::new();
        for n in 0..count {
            doc.insert(FieldType::TextField.construct(&format!("f{n}")), n).unwrap();
        }
        let instance = FieldType::ParagraphField.construct("probe");
        let at = doc.insert(instance.clone(), index).unwrap();
        prop_assert_eq!(at, index.min(count));
        prop_assert_eq!(doc.len(), count + 1);
        prop_assert_eq!(&doc.elements()[at], &instance);
    }
}
