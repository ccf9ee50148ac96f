use catalog::CatalogIndex;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data/sample");

    println!("Loading catalog fixtures...\n");

    let start = Instant::now();
    let index = CatalogIndex::load_from_dir(data_dir)
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let (items, reservations, users) = index.counts();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Items: {}", items);
    println!("Reservations: {}", reservations);
    println!("Users: {}", users);

    for item in index.items() {
        println!(
            "  {} - {} ({}-{} guests) [{} periods]",
            item.id,
            item.location,
            item.min_guests,
            item.max_guests,
            index.get_reservations(&item.id).len()
        );
    }
}
