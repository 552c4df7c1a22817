// Example: data requests issued on mount and when the tail is scrolled into view.
use std::sync::{Arc, Mutex};

use virtual_list::{DataRequest, ScrollMetrics, VirtualList, VirtualListOptions};

fn metrics(scroll_top: u64, count: usize) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top,
        scroll_height: count as u64 * 20,
        client_height: 200,
        ..ScrollMetrics::default()
    }
}

fn main() {
    let pages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&pages);
    let options = VirtualListOptions::new(20, 5)
        .with_on_data_request(Some(move |req: DataRequest| sink.lock().unwrap().push(req)));

    let mut list = VirtualList::<u64>::new(options).unwrap();
    list.attach(0, metrics(0, 0));
    list.run_deferred();

    let mut count = 50;
    list.set_items(count);
    let mut now_ms = 0;
    for _ in 0..3 {
        // Jump to the bottom, then let the host "fetch" the next page.
        now_ms += 100;
        let bottom = count as u64 * 20 - 200;
        list.on_scroll_event(metrics(bottom, count), now_ms);
        if list.run_deferred() > 0 {
            list.set_loading(true);
            count += 50;
            list.set_items(count);
            list.set_loading(false);
        }
        println!("count={count} range={:?}", list.range());
    }

    println!("requests={:?}", pages.lock().unwrap());
}
