use obstacle_index::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("Obstacle index - getting started\n");

    let mut index = IndexBuilder::new()
        .obstacle(Obstacle::new(10, 1, "roca"))
        .obstacle(Obstacle::new(5, 2, "cono"))
        .obstacle(Obstacle::new(15, 0, "hueco"))
        .obstacle(Obstacle::new(3, 1, "aceite"))
        .build()?;

    println!("Tree after seeding:");
    print!("{}", index.structure());

    let sorted: Vec<String> = index.inorder().iter().map(|o| o.to_string()).collect();
    println!("\nIn order:   {}", sorted.join(", "));

    let near = index.range_search(0, 12, 0, 5);
    println!("In [0,12]x[0,5]: {} obstacles", near.len());

    // A player places a new obstacle ahead of the anchor
    match index.place(Obstacle::new(2, 9, "roca"), 0) {
        Ok(_) => println!("Placed obstacle"),
        Err(e) => println!("Rejected placement: {}", e),
    }
    index.place(Obstacle::new(40, 4, "cono"), 0)?;

    let catalog = KindCatalog::default();
    for obstacle in index.visible_records(0, 40) {
        println!(
            "  visible {} (damage {})",
            obstacle,
            catalog.damage_for(&obstacle)?
        );
    }

    index.delete(10, 1);
    println!("\nAfter deleting the root:");
    print!("{}", index.structure());

    let stats = index.stats();
    println!(
        "\nheight={} nodes={} ideal={} efficiency={:.1}%",
        stats.height, stats.node_count, stats.ideal_height, stats.efficiency
    );

    index.reset();
    println!("After reset: {} obstacles", index.count());

    Ok(())
}
