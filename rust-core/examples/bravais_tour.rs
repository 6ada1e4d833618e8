/// Example walking through the main entry points of the crate
///
/// Builds a lattice from its parameters, hides it behind a unimodular basis change,
/// recovers the family with the classifier and samples a band path.
use bravais_lattice::lattice::{
    BravaisType, Cell, body_centered_tetragonal_lattice, identify_bravais_lattice,
};
use nalgebra::Matrix3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Bravais lattices, special points and band paths ===\n");

    // Example 1: A lattice from its parameters
    println!("1. Body-centred tetragonal lattice:");
    let bct = body_centered_tetragonal_lattice(3.0, 5.0)?;
    print!("{}", bct);
    let [a, b, c, alpha, beta, gamma] = bct.cellpar()?;
    println!(
        "   Primitive cell: a={:.3}, b={:.3}, c={:.3}, α={:.2}, β={:.2}, γ={:.2}\n",
        a, b, c, alpha, beta, gamma
    );

    // Example 2: Classification of a scrambled cell
    println!("2. Classifying a scrambled copy:");
    let scramble = Matrix3::new(
        1.0, 1.0, 0.0,
        0.0, 1.0, 0.0,
        2.0, 1.0, 1.0,
    );
    let cell = Cell::from_matrix(bct.to_cell()?.basis() * scramble)?;
    let classification = identify_bravais_lattice(&cell)?;
    println!("   Found: {}", classification.lattice.repr());
    println!("   Variant: {}", classification.lattice.variant().name);
    println!("   Transform to the matched basis: {}", classification.transform);
    assert_eq!(classification.kind(), BravaisType::Bct);

    // Example 3: Band path
    println!("3. Default band path:");
    let path = classification.lattice.bandpath(None, 60, None)?;
    println!("   {}", path);
    let (_, special_x, labels) = path.linear_kpoint_axis();
    for (x, label) in special_x.iter().zip(labels) {
        println!("   {:>5} at x = {:.4}", label, x);
    }

    // Example 4: Special points in the basis of the scrambled input
    println!("\n4. Special points relative to the input reciprocal basis:");
    for point in classification.special_points_in_input_basis()? {
        println!(
            "   {:>2}: [{:.4}, {:.4}, {:.4}]",
            point.display_label(),
            point.position[0],
            point.position[1],
            point.position[2]
        );
    }

    Ok(())
}
