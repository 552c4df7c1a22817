// Example: minimal usage with a fixed-height list.
use virtual_list::{ScrollMetrics, VirtualList, VirtualListOptions};

fn main() {
    let mut list = VirtualList::<u64>::new(VirtualListOptions::new(20, 5)).unwrap();
    list.set_items(1_000);
    list.attach(
        0,
        ScrollMetrics {
            scroll_top: 0,
            scroll_width: 800,
            scroll_height: 20_000,
            client_height: 250,
            ..ScrollMetrics::default()
        },
    );

    let mut rows = Vec::new();
    list.collect_rows(&mut rows);
    println!("total_height={}", list.total_height());
    println!("range={:?} buffer={}", list.range(), list.buffer_size());
    println!("first_row={:?}", rows.first());

    list.set_scroll_offset(12_000);
    println!("after scroll: {:?}", list.state());
}
