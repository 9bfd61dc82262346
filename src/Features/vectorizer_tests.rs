#[cfg(test)]
mod tests {
    use crate::Features::bond_catalog::BondCatalog;
    use crate::Features::elements::ElementTable;
    use crate::Features::error::FeatureError;
    use crate::Features::molecular_record::MolecularRecord;
    use crate::Features::vectorizer::{FeatureConstructor, FeatureVector, SpeciesIdentity};
    use std::collections::HashMap;

    fn catalog(list: &[&str]) -> BondCatalog {
        BondCatalog::new(list.iter().map(|s| s.to_string()).collect()).unwrap()
    }
    // scenario catalog ["C-H", "C-C", "C=O"] extended with O-H and the radical token C.
    fn constructor() -> FeatureConstructor {
        FeatureConstructor::new(
            ElementTable::builtin(),
            catalog(&["C-H", "C-C", "C=O", "O-H", "C."]),
        )
        .unwrap()
    }

    fn ethane_fragment() -> MolecularRecord {
        // C1-H3, C1-H4, C1-C2
        MolecularRecord::from_symbols(
            &["C", "C", "H", "H"],
            &[(1, 3, 1), (1, 4, 1), (1, 2, 1)],
            None,
        )
    }

    fn vector(values: &[i64]) -> FeatureVector {
        FeatureVector::from_vec(values.to_vec())
    }

    #[test]
    fn test_counts_tokens() {
        let constructor = FeatureConstructor::with_radical_fragment(
            ElementTable::builtin(),
            catalog(&["C-H", "C-C", "C=O"]),
            &["C-H"],
        )
        .unwrap();
        let result = constructor
            .vectorize(SpeciesIdentity::Real(6324), Some(&ethane_fragment()))
            .unwrap()
            .unwrap();
        assert_eq!(result.to_vec(), vec![2, 1, 0]);
    }

    #[test]
    fn test_unknown_tokens_are_skipped() {
        let constructor = constructor();
        // N#N is not in the catalog, H-C is the reversed spelling of C-H
        let record = MolecularRecord::from_symbols(
            &["N", "N", "H", "C"],
            &[(1, 2, 3), (3, 4, 1)],
            None,
        );
        let result = constructor
            .vectorize(SpeciesIdentity::Real(1), Some(&record))
            .unwrap()
            .unwrap();
        assert!(result.is_zero());
        assert_eq!(result.len(), constructor.dimension());
    }

    #[test]
    fn test_length_equals_catalog_length() {
        let constructor = constructor();
        let records = vec![
            MolecularRecord::default(),
            ethane_fragment(),
            MolecularRecord::from_symbols(&["O", "H"], &[(1, 2, 1)], Some(1)),
        ];
        for record in records.iter() {
            let result = constructor
                .vectorize(SpeciesIdentity::Real(7), Some(record))
                .unwrap()
                .unwrap();
            assert_eq!(result.len(), 5);
        }
        for identity in [SpeciesIdentity::RadicalFragment, SpeciesIdentity::Catalyst] {
            let result = constructor.vectorize(identity, None).unwrap().unwrap();
            assert_eq!(result.len(), 5);
        }
    }

    #[test]
    fn test_vectorize_is_idempotent() {
        let constructor = constructor();
        let record = ethane_fragment();
        let first = constructor.vectorize(SpeciesIdentity::Real(3), Some(&record));
        let second = constructor.vectorize(SpeciesIdentity::Real(3), Some(&record));
        assert_eq!(first, second);
    }

    #[test]
    fn test_radical_fragment_vector() {
        let constructor = constructor();
        let result = constructor
            .vectorize(SpeciesIdentity::RadicalFragment, None)
            .unwrap()
            .unwrap();
        assert_eq!(result.to_vec(), vec![1, 0, 0, 0, 1]);
        assert_eq!(result.as_slice().iter().sum::<i64>(), 2);
        // the fixed vector equals the real computation on the ·CH fragment
        let ch_radical = MolecularRecord::from_symbols(&["C", "H"], &[(1, 2, 1)], Some(1));
        assert_eq!(constructor.bonds_count(&ch_radical).unwrap(), result);
    }

    #[test]
    fn test_radical_fragment_follows_catalog_order() {
        let constructor = FeatureConstructor::new(
            ElementTable::builtin(),
            catalog(&["C.", "O-H", "C-C", "C-H"]),
        )
        .unwrap();
        let result = constructor.radical_fragment_vector();
        assert_eq!(result.to_vec(), vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_catalog_without_radical_tokens_is_rejected() {
        let result = FeatureConstructor::new(ElementTable::builtin(), catalog(&["C-H", "C-C"]));
        assert!(matches!(result, Err(FeatureError::Catalog(_))));
    }

    #[test]
    fn test_catalyst_is_zero() {
        let constructor = constructor();
        let result = constructor
            .vectorize(SpeciesIdentity::Catalyst, None)
            .unwrap()
            .unwrap();
        assert_eq!(result, FeatureVector::zeros(5));
    }

    #[test]
    fn test_missing_species_have_no_vector() {
        let constructor = constructor();
        let record = ethane_fragment();
        assert_eq!(
            constructor.vectorize(SpeciesIdentity::MissingReactant, Some(&record)),
            Ok(None)
        );
        assert_eq!(
            constructor.vectorize(SpeciesIdentity::MissingProduct, None),
            Ok(None)
        );
        assert_eq!(constructor.vectorize(SpeciesIdentity::Real(5), None), Ok(None));
    }

    #[test]
    fn test_malformed_record_is_an_error() {
        let constructor = constructor();
        let record = MolecularRecord::from_symbols(&["C"], &[(1, 2, 1)], None);
        let result = constructor.vectorize(SpeciesIdentity::Real(1), Some(&record));
        assert!(matches!(result, Err(FeatureError::MalformedRecord(_))));
    }

    fn three_slot_constructor() -> FeatureConstructor {
        FeatureConstructor::with_radical_fragment(
            ElementTable::builtin(),
            catalog(&["C-H", "C-C", "C=O"]),
            &["C-H", "C-C"],
        )
        .unwrap()
    }

    fn resolver(
        map: &HashMap<SpeciesIdentity, FeatureVector>,
    ) -> impl Fn(&SpeciesIdentity) -> Option<FeatureVector> + '_ {
        move |identity| map.get(identity).cloned()
    }

    fn abc() -> HashMap<SpeciesIdentity, FeatureVector> {
        HashMap::from([
            (SpeciesIdentity::Real(1), vector(&[1, 0, 0])),
            (SpeciesIdentity::Real(2), vector(&[0, 1, 0])),
            (SpeciesIdentity::Real(3), vector(&[1, 0, 0])),
            (SpeciesIdentity::Real(4), vector(&[3, 2, 1])),
        ])
    }

    #[test]
    fn test_reaction_delta_scenario() {
        let constructor = three_slot_constructor();
        let map = abc();
        let products = [SpeciesIdentity::Real(1), SpeciesIdentity::Real(2)];
        let reactants = [SpeciesIdentity::Real(3)];
        let delta = constructor
            .reaction_delta(&products, &reactants, resolver(&map))
            .unwrap();
        assert_eq!(delta.to_vec(), vec![0, 1, 0]);
    }

    #[test]
    fn test_reaction_delta_is_antisymmetric() {
        let constructor = three_slot_constructor();
        let map = abc();
        let p = [SpeciesIdentity::Real(1), SpeciesIdentity::Real(4)];
        let r = [SpeciesIdentity::Real(2), SpeciesIdentity::Real(3)];
        let forward = constructor.reaction_delta(&p, &r, resolver(&map)).unwrap();
        let backward = constructor.reaction_delta(&r, &p, resolver(&map)).unwrap();
        assert_eq!(forward, -backward);
        assert_eq!(forward.to_vec(), vec![3, 1, 1]);
    }

    #[test]
    fn test_reaction_delta_ignores_order() {
        let constructor = three_slot_constructor();
        let map = abc();
        let p1 = [
            SpeciesIdentity::Real(1),
            SpeciesIdentity::Real(2),
            SpeciesIdentity::Real(4),
        ];
        let p2 = [
            SpeciesIdentity::Real(4),
            SpeciesIdentity::Real(1),
            SpeciesIdentity::Real(2),
        ];
        let r1 = [SpeciesIdentity::Real(3), SpeciesIdentity::Catalyst];
        let r2 = [SpeciesIdentity::Catalyst, SpeciesIdentity::Real(3)];
        let resolve = |identity: &SpeciesIdentity| {
            if *identity == SpeciesIdentity::Catalyst {
                Some(FeatureVector::zeros(3))
            } else {
                map.get(identity).cloned()
            }
        };
        let a = constructor.reaction_delta(&p1, &r1, resolve).unwrap();
        let b = constructor.reaction_delta(&p2, &r2, resolve).unwrap();
        let c = constructor.reaction_delta(&p1, &r2, resolve).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_reaction_delta_with_missing_species_is_undefined() {
        let constructor = three_slot_constructor();
        let map = abc();
        let products = [SpeciesIdentity::Real(1), SpeciesIdentity::MissingProduct];
        let reactants = [SpeciesIdentity::Real(3)];
        let result = constructor.reaction_delta(&products, &reactants, resolver(&map));
        assert_eq!(
            result,
            Err(FeatureError::Undefined(SpeciesIdentity::MissingProduct))
        );

        let products = [SpeciesIdentity::Real(1)];
        let reactants = [SpeciesIdentity::Real(3), SpeciesIdentity::Real(99)];
        let result = constructor.reaction_delta(&products, &reactants, resolver(&map));
        assert_eq!(result, Err(FeatureError::Undefined(SpeciesIdentity::Real(99))));
    }

    #[test]
    fn test_missing_placeholder_is_undefined_even_if_resolved() {
        let constructor = three_slot_constructor();
        let result = constructor.reaction_delta(
            &[SpeciesIdentity::Real(1)],
            &[SpeciesIdentity::MissingReactant],
            |_| Some(FeatureVector::zeros(3)),
        );
        assert_eq!(
            result,
            Err(FeatureError::Undefined(SpeciesIdentity::MissingReactant))
        );
    }

    #[test]
    fn test_reaction_delta_rejects_foreign_vectors() {
        let constructor = three_slot_constructor();
        let result = constructor.reaction_delta(&[SpeciesIdentity::Real(1)], &[], |_| {
            Some(FeatureVector::zeros(7))
        });
        assert_eq!(
            result,
            Err(FeatureError::DimensionMismatch {
                expected: 3,
                found: 7
            })
        );
    }

    #[test]
    fn test_reaction_delta_from_records() {
        let constructor = constructor();
        let ethane = ethane_fragment();
        let methanol = MolecularRecord::from_symbols(
            &["C", "O", "H", "H", "H", "H"],
            &[(1, 2, 1), (1, 3, 1), (1, 4, 1), (1, 5, 1), (2, 6, 1)],
            None,
        );
        let records = |cid: u64| match cid {
            10 => Some(ethane.clone()),
            20 => Some(methanol.clone()),
            _ => None,
        };
        // methanol + ·CH -> fragment 10
        let delta = constructor
            .reaction_delta_from_records(
                &[SpeciesIdentity::Real(10)],
                &[SpeciesIdentity::Real(20), SpeciesIdentity::RadicalFragment],
                records,
            )
            .unwrap();
        // catalog: C-H, C-C, C=O, O-H, C.
        assert_eq!(delta.to_vec(), vec![2 - 3 - 1, 1, 0, -1, -1]);

        let result = constructor.reaction_delta_from_records(
            &[SpeciesIdentity::Real(10)],
            &[SpeciesIdentity::Real(30)],
            records,
        );
        assert_eq!(result, Err(FeatureError::Undefined(SpeciesIdentity::Real(30))));
    }

    #[test]
    fn test_empty_reaction_is_zero() {
        let constructor = three_slot_constructor();
        let delta = constructor.reaction_delta(&[], &[], |_| None).unwrap();
        assert!(delta.is_zero());
        assert_eq!(delta.len(), 3);
    }

    #[test]
    fn test_legacy_codes() {
        assert_eq!(
            SpeciesIdentity::from_legacy_code(887),
            Some(SpeciesIdentity::Real(887))
        );
        assert_eq!(
            SpeciesIdentity::from_legacy_code(-1),
            Some(SpeciesIdentity::RadicalFragment)
        );
        assert_eq!(SpeciesIdentity::from_legacy_code(0), None);
        assert_eq!(SpeciesIdentity::from_legacy_code(-9), None);
        for identity in [
            SpeciesIdentity::Real(12),
            SpeciesIdentity::RadicalFragment,
            SpeciesIdentity::Catalyst,
            SpeciesIdentity::MissingReactant,
            SpeciesIdentity::MissingProduct,
        ] {
            assert_eq!(
                identity
                    .legacy_code()
                    .and_then(SpeciesIdentity::from_legacy_code),
                Some(identity)
            );
        }
        assert_eq!(SpeciesIdentity::Real(i64::MAX as u64).legacy_code(), Some(i64::MAX));
        assert_eq!(SpeciesIdentity::Real(u64::MAX).legacy_code(), None);
        assert!(SpeciesIdentity::MissingReactant.is_missing());
        assert!(!SpeciesIdentity::Catalyst.is_missing());
    }

    #[test]
    fn test_repeated_radical_fragment_token_is_rejected() {
        let result = FeatureConstructor::with_radical_fragment(
            ElementTable::builtin(),
            catalog(&["C-H", "C-C", "C."]),
            &["C-H", "C-H"],
        );
        assert!(matches!(result, Err(FeatureError::Catalog(_))));
    }

    #[test]
    fn test_constructor_is_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FeatureConstructor>();
    }
}
