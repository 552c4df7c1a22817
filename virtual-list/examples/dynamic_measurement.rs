// Example: rows report their real heights as they are mounted and resized.
use virtual_list::{ScrollMetrics, VirtualList, VirtualListOptions};

fn main() {
    let mut list = VirtualList::<u64>::new(VirtualListOptions::new(20, 2)).unwrap();
    list.set_items(100);
    list.attach(
        0,
        ScrollMetrics {
            scroll_height: 2_000,
            client_height: 100,
            ..ScrollMetrics::default()
        },
    );
    println!("before: total={} range={:?}", list.total_height(), list.range());

    // Every third row renders taller than the minimum.
    let range = list.range();
    for index in range.start_index..range.end_index {
        let height = if index % 3 == 0 { 45 } else { 20 };
        list.mount_row(index, 1_000 + index as u64, height);
    }
    println!("mounted: total={} range={:?}", list.total_height(), list.range());

    // A size observation for a mounted node.
    list.on_node_resize(&1_001, 60);
    println!(
        "resize(1): row_top(2)={:?} total={}",
        list.row_top(2),
        list.total_height()
    );

    // Scrolling far away evicts the measured rows.
    list.set_scroll_offset(1_500);
    println!(
        "scrolled: range={:?} mounted={} measured={}",
        list.range(),
        list.mounted_len(),
        list.heights().len()
    );
}
