//! Walk through the three representations of GF(2^8).
//!
//! Run with: cargo run --example field_basics

use gf2n::{
    binary_field, BasicElem, BasicPoly, BinaryField, FieldParams, GfError, GfMatrix, PowPoly,
    TablePoly, TableRegistry,
};

binary_field! {
    /// GF(256) defined by x^8 + x^4 + x^3 + x^2 + 1.
    struct Gf256(u16 = 0x11d);
}

fn main() -> Result<(), GfError> {
    Gf256::validate()?;
    Gf256::validate_full()?;

    // Fixed-modulus family: the field is part of the type.
    let a = BasicPoly::<Gf256>::new(0x53);
    let b = BasicPoly::<Gf256>::new(0xca);
    println!("a = {a}");
    println!("b = {b}");
    println!("a + b = {}", a + b);
    println!("a * b = {}", a * b);

    let (pa, pb) = (PowPoly::from(a), PowPoly::from(b));
    let (ta, tb) = (TablePoly::from(a), TablePoly::from(b));
    assert_eq!((pa * pb).value(), (a * b).value());
    assert_eq!((ta / tb).value(), (a / b).value());
    println!("log_x(a) = {:?}", pa.log());

    // Runtime-modulus family: tables come from a registry as shared handles.
    let registry = TableRegistry::global();
    let x = registry.pow_elem(0x53u16, 0x11d)?;
    let y = registry.pow_elem(0xcau16, 0x11d)?;
    println!("x * y = {}", &x * &y);
    println!("x^-1 = {:?}", x.inverse());

    let other = BasicElem::new(3u16, 0b1011)?;
    match x.to_basic().try_add(&other) {
        Err(e) => println!("mixing fields fails: {e}"),
        Ok(sum) => println!("unexpected sum {sum}"),
    }

    // Elements stored in a matrix share one field descriptor.
    let mut m = GfMatrix::new(2, 2, x.state());
    m.set(0, 0, &x.to_basic())?;
    m.set(1, 1, &y.to_basic())?;
    m.update(0, 1, |e| e + BasicElem::one(e.state()))?;
    print!("{m}");

    println!("{registry:?}");
    Ok(())
}
