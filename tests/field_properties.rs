use proptest::prelude::*;

use gf2n::{
    binary_field, BasicElem, BasicPoly, BinaryField, FieldState, GfError, PowElem, PowPoly,
    TableElem, TablePoly, TableRegistry,
};

/// x^8 + x^4 + x^3 + x^2 + 1
const M: u16 = 0x11d;

binary_field! {
    struct Gf256(u16 = 0x11d);
}

type Basic = BasicPoly<Gf256>;
type Pow = PowPoly<Gf256>;
type Table = TablePoly<Gf256>;

fn state() -> FieldState<u16> {
    FieldState::new(M).unwrap()
}

fn arb_value() -> impl Strategy<Value = u16> {
    0u16..256
}

fn arb_nonzero() -> impl Strategy<Value = u16> {
    1u16..256
}

fn basic_elem(v: u16) -> BasicElem<u16> {
    BasicElem::with_state(v, state())
}

fn pow_elem(v: u16) -> PowElem<u16> {
    TableRegistry::global().pow_elem(v, M).unwrap()
}

fn table_elem(v: u16) -> TableElem<u16> {
    TableRegistry::global().table_elem(v, M).unwrap()
}

/// Field axioms checked through the common trait, so every representation
/// goes through the same assertions.
fn check_field_laws<F: BinaryField>(a: &F, b: &F, c: &F) -> Result<(), TestCaseError> {
    let add = |x: &F, y: &F| x.try_add(y).unwrap();
    let mul = |x: &F, y: &F| x.try_mul(y).unwrap();
    let zero = a.pow(1).try_sub(a).unwrap();
    let one = a.pow(0);

    prop_assert!(zero.is_zero());
    prop_assert!(one.is_one());

    prop_assert_eq!(add(a, b), add(b, a));
    prop_assert_eq!(mul(a, b), mul(b, a));
    prop_assert_eq!(add(&add(a, b), c), add(a, &add(b, c)));
    prop_assert_eq!(mul(&mul(a, b), c), mul(a, &mul(b, c)));
    prop_assert_eq!(mul(a, &add(b, c)), add(&mul(a, b), &mul(a, c)));

    prop_assert_eq!(add(a, &zero), a.clone());
    prop_assert!(add(a, a).is_zero());
    prop_assert_eq!(mul(a, &one), a.clone());
    prop_assert!(mul(a, &zero).is_zero());
    prop_assert!(mul(&zero, a).is_zero());

    let mut inverted = b.clone();
    if !b.is_zero() {
        let inv = b.inverse().unwrap();
        prop_assert!(mul(b, &inv).is_one());
        prop_assert_eq!(a.try_div(b).unwrap(), mul(a, &inv));
        inverted.invert().unwrap();
        prop_assert_eq!(inverted, inv);
    } else {
        prop_assert_eq!(a.try_div(b), Err(GfError::DivisionByZero));
        prop_assert_eq!(b.inverse(), None);
        prop_assert_eq!(inverted.invert(), Err(GfError::DivisionByZero));
    }
    Ok(())
}

fn check_power_law<F: BinaryField>(a: &F, m: u64, n: u64) -> Result<(), TestCaseError> {
    let group = a.gf_order() - 1;
    let lhs = a.pow(m).try_mul(&a.pow(n)).unwrap();
    prop_assert_eq!(lhs, a.pow((m + n) % group));
    Ok(())
}

// ===== Field laws per representation =====

proptest! {
    #[test]
    fn basic_elem_laws(a in arb_value(), b in arb_value(), c in arb_value()) {
        check_field_laws(&basic_elem(a), &basic_elem(b), &basic_elem(c))?;
    }
}

proptest! {
    #[test]
    fn pow_elem_laws(a in arb_value(), b in arb_value(), c in arb_value()) {
        check_field_laws(&pow_elem(a), &pow_elem(b), &pow_elem(c))?;
    }
}

proptest! {
    #[test]
    fn table_elem_laws(a in arb_value(), b in arb_value(), c in arb_value()) {
        check_field_laws(&table_elem(a), &table_elem(b), &table_elem(c))?;
    }
}

proptest! {
    #[test]
    fn basic_poly_laws(a in arb_value(), b in arb_value(), c in arb_value()) {
        check_field_laws(&Basic::new(a), &Basic::new(b), &Basic::new(c))?;
    }
}

proptest! {
    #[test]
    fn pow_poly_laws(a in arb_value(), b in arb_value(), c in arb_value()) {
        check_field_laws(&Pow::new(a), &Pow::new(b), &Pow::new(c))?;
    }
}

proptest! {
    #[test]
    fn table_poly_laws(a in arb_value(), b in arb_value(), c in arb_value()) {
        check_field_laws(&Table::new(a), &Table::new(b), &Table::new(c))?;
    }
}

// ===== Power law =====

proptest! {
    #[test]
    fn power_law(a in arb_nonzero(), m in 0u64..1000, n in 0u64..1000) {
        check_power_law(&basic_elem(a), m, n)?;
        check_power_law(&pow_elem(a), m, n)?;
        check_power_law(&table_elem(a), m, n)?;
        check_power_law(&Basic::new(a), m, n)?;
        check_power_law(&Pow::new(a), m, n)?;
        check_power_law(&Table::new(a), m, n)?;
    }
}

proptest! {
    #[test]
    fn group_order_is_255(a in arb_nonzero()) {
        prop_assert_eq!(Basic::new(a).pow(255), Basic::ONE);
        prop_assert_eq!(Pow::new(a).pow(255), Pow::ONE);
    }
}

// ===== Cross-representation equivalence =====

proptest! {
    #[test]
    fn representations_agree(a in arb_value(), b in arb_value(), e in 0u64..600) {
        let basic = (basic_elem(a), basic_elem(b));
        let pow = (pow_elem(a), pow_elem(b));
        let table = (table_elem(a), table_elem(b));
        let fixed = (Basic::new(a), Basic::new(b));

        let sum = (basic.0 + basic.1).value();
        prop_assert_eq!((&pow.0 + &pow.1).value(), sum);
        prop_assert_eq!((&table.0 + &table.1).value(), sum);
        prop_assert_eq!((fixed.0 + fixed.1).value(), sum);
        prop_assert_eq!((Pow::new(a) + Pow::new(b)).value(), sum);
        prop_assert_eq!((Table::new(a) + Table::new(b)).value(), sum);

        let product = (basic.0 * basic.1).value();
        prop_assert_eq!((&pow.0 * &pow.1).value(), product);
        prop_assert_eq!((&table.0 * &table.1).value(), product);
        prop_assert_eq!((fixed.0 * fixed.1).value(), product);
        prop_assert_eq!((Pow::new(a) * Pow::new(b)).value(), product);
        prop_assert_eq!((Table::new(a) * Table::new(b)).value(), product);

        let quotient = basic.0.try_div(&basic.1).map(|q| q.value());
        prop_assert_eq!(pow.0.try_div(&pow.1).map(|q| q.value()), quotient);
        prop_assert_eq!(table.0.try_div(&table.1).map(|q| q.value()), quotient);
        prop_assert_eq!(fixed.0.try_div(&fixed.1).map(|q| q.value()), quotient);
        prop_assert_eq!(Pow::new(a).try_div(&Pow::new(b)).map(|q| q.value()), quotient);
        prop_assert_eq!(Table::new(a).try_div(&Table::new(b)).map(|q| q.value()), quotient);

        let power = basic.0.pow(e).value();
        prop_assert_eq!(BinaryField::pow(&pow.0, e).value(), power);
        prop_assert_eq!(BinaryField::pow(&table.0, e).value(), power);
        prop_assert_eq!(fixed.0.pow(e).value(), power);
        prop_assert_eq!(Pow::new(a).pow(e).value(), power);
    }
}

// ===== Reduction and construction =====

proptest! {
    #[test]
    fn construction_always_reduces(raw in any::<u64>()) {
        let s = state();
        prop_assert!(BasicElem::from_u64(raw, s).value() < 256);
        prop_assert!(Basic::from_u64(raw).value() < 256);
        prop_assert!(gf2n::reduce(raw, M as u64) < 256);
    }
}

proptest! {
    #[test]
    fn coefficients_pack_highest_first(bits in proptest::collection::vec(0u8..2, 1..9)) {
        let expected = bits.iter().fold(0u16, |acc, &b| (acc << 1) | b as u16);
        let a = BasicElem::from_coeffs(bits.iter().copied(), M).unwrap();
        prop_assert_eq!(a.value(), expected);
        prop_assert_eq!(Basic::from_coeffs(bits).value(), expected);
    }
}

// ===== Modulus validation =====

proptest! {
    #[test]
    fn accepted_moduli_define_fields(modulus in 2u16..2048, raw in 1u16..2048) {
        if let Ok(state) = FieldState::new(modulus) {
            let a = BasicElem::from_u64(raw as u64, state);
            if !a.is_zero() {
                let inv = a.inverse().unwrap();
                prop_assert!((a * inv).is_one());
                prop_assert!(a.try_div(&a).unwrap().is_one());
            }
        } else {
            prop_assert!(BasicElem::new(1, modulus).is_err());
            prop_assert!(TableRegistry::new().table_elem(1, modulus).is_err());
        }
    }
}

// ===== Failure modes =====

proptest! {
    #[test]
    fn division_by_zero_fails(a in arb_value()) {
        prop_assert_eq!(basic_elem(a).try_div(&basic_elem(0)), Err(GfError::DivisionByZero));
        prop_assert_eq!(
            pow_elem(a).try_div(&pow_elem(0)).map(|q| q.value()),
            Err(GfError::DivisionByZero)
        );
        prop_assert_eq!(
            table_elem(a).try_div(&table_elem(0)).map(|q| q.value()),
            Err(GfError::DivisionByZero)
        );
        prop_assert_eq!(Basic::new(a).checked_div(Basic::ZERO), None);
        prop_assert_eq!(Pow::new(a).checked_div(Pow::ZERO), None);
        prop_assert_eq!(Table::new(a).checked_div(Table::ZERO), None);
    }
}

proptest! {
    #[test]
    fn cross_field_operations_fail(a in arb_value(), b in 0u16..512) {
        // x^9 + x^4 + 1
        let other_modulus = 0b10_0001_0001u16;
        let lhs = basic_elem(a);
        let rhs = BasicElem::new(b, other_modulus).unwrap();
        let err = Err(GfError::CrossField { lhs: M as u64, rhs: other_modulus as u64 });

        prop_assert_eq!(lhs.try_add(&rhs), err);
        prop_assert_eq!(lhs.try_mul(&rhs), err);
        prop_assert_eq!(lhs.try_div(&rhs), err);
        prop_assert!(lhs.try_cmp(&rhs).is_err());
        prop_assert!(lhs.partial_cmp(&rhs).is_none());

        let other = TableRegistry::global().pow_elem(b, other_modulus).unwrap();
        prop_assert!(pow_elem(a).try_mul(&other).is_err());
    }
}

proptest! {
    #[test]
    fn ordering_follows_values(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(basic_elem(a).partial_cmp(&basic_elem(b)), Some(a.cmp(&b)));
        prop_assert_eq!(Basic::new(a).cmp(&Basic::new(b)), a.cmp(&b));
    }
}
