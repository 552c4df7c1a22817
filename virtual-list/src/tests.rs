use crate::*;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

const ROOT: u64 = 0;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn node(index: usize) -> u64 {
    1000 + index as u64
}

/// Container geometry of a 1000 x 20px list in a 250px viewport.
fn at(scroll_top: u64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_left: 0,
        scroll_top,
        scroll_width: 800,
        scroll_height: 20_000,
        client_height: 250,
    }
}

fn attached(options: VirtualListOptions, count: usize) -> VirtualList<u64> {
    let mut list = VirtualList::new(options).unwrap();
    list.set_items(count);
    assert!(list.attach(ROOT, at(0)));
    list
}

fn default_list() -> VirtualList<u64> {
    attached(VirtualListOptions::new(20, 5), 1000)
}

fn mount_range(list: &mut VirtualList<u64>, height: u32) {
    let range = list.range();
    for i in range.start_index..range.end_index {
        list.mount_row(i, node(i), height);
    }
}

fn recorder() -> (Arc<Mutex<Vec<DataRequest>>>, impl Fn(DataRequest) + Send + Sync + 'static) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&requests);
    (requests, move |req: DataRequest| sink.lock().unwrap().push(req))
}

fn expected_total(heights: &[u32]) -> u64 {
    heights.iter().map(|&h| h as u64).sum()
}

#[test]
fn initial_window_for_default_scenario() {
    let list = default_list();
    assert_eq!(list.viewport_height(), 250);
    assert_eq!(list.buffer_size(), 12);

    let range = list.range();
    assert_eq!(range.start_index, 0);
    // 13 rows reach past 250px, plus 12 buffer rows, minus one.
    assert_eq!(range.last_index(), Some(24));
    assert_eq!(list.total_height(), 20_000);
}

#[test]
fn effective_buffer_size_takes_the_larger_value() {
    assert_eq!(effective_buffer_size(250, 20, 5), 12);
    assert_eq!(effective_buffer_size(0, 20, 5), 5);
    assert_eq!(window::effective_buffer_size(1000, 20, 5), 50);
    assert_eq!(window::effective_buffer_size(19, 20, 0), 0);
}

#[test]
fn empty_list_renders_nothing() {
    let list = attached(VirtualListOptions::new(20, 5), 0);
    let range = list.range();
    assert_eq!(range.start_index, 0);
    assert!(range.is_empty());
    assert_eq!(range.last_index(), None);
    assert_eq!(list.total_height(), 0);

    let mut rows = Vec::new();
    list.collect_rows(&mut rows);
    assert!(rows.is_empty());
    assert_eq!(list.row_top(0), None);
}

#[test]
fn scrolling_moves_the_window() {
    let mut list = default_list();
    list.set_scroll_offset(2000);
    let range = list.range();
    // 101 rows reach past 2000px; 113 rows reach past 2250px.
    assert_eq!(range.start_index, 101 - 12);
    assert_eq!(range.end_index, 113 + 12);

    list.set_scroll_offset(19_750);
    assert_eq!(list.range().last_index(), Some(999));

    list.set_scroll_offset(0);
    assert_eq!(list.range().start_index, 0);
}

#[test]
fn window_properties_hold_for_random_lists() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..200 {
        let count = rng.gen_range_usize(0, 300);
        let min = rng.gen_range_u32(5, 40);
        let buffer = rng.gen_range_usize(0, 8);
        let viewport = rng.gen_range_u32(0, 400);

        let mut map = HeightMap::new();
        let mut heights = vec![min; count];
        for (i, h) in heights.iter_mut().enumerate() {
            if rng.gen_bool() {
                *h = rng.gen_range_u32(min, min * 4);
                assert!(map.record(i, *h, min));
            }
        }

        let total = window::total_height(&map, count, min);
        assert_eq!(total, expected_total(&heights));
        for index in [0, count / 2, count] {
            assert_eq!(
                window::row_top(&map, min, index),
                expected_total(&heights[..index])
            );
        }

        let buf = window::effective_buffer_size(viewport, min, buffer);

        let top = window::row_range(&map, count, min, 0, viewport, buf);
        assert_eq!(top.start_index, 0);

        let max_offset = total.saturating_sub(viewport as u64);
        let bottom = window::row_range(&map, count, min, max_offset, viewport, buf);
        assert_eq!(bottom.end_index, count);

        let offset = rng.gen_range_u64(0, total.max(1));
        let r = window::row_range(&map, count, min, offset, viewport, buf);
        assert!(r.end_index <= count);
        let visible = (viewport / min) as usize + 1;
        assert!(
            r.len() <= visible + 2 * buf,
            "range {r:?} exceeds visible({visible}) + 2 * buffer({buf})"
        );
    }
}

#[test]
fn total_height_grows_with_the_item_count() {
    let mut list = attached(VirtualListOptions::new(20, 5), 0);
    let mut last = 0;
    for count in [1usize, 2, 10, 100, 1000] {
        list.set_items(count);
        assert!(list.total_height() >= last);
        assert_eq!(list.total_height(), count as u64 * 20);
        last = list.total_height();
    }
}

#[test]
fn measurements_feed_layout_and_total_height() {
    let mut list = default_list();
    assert!(list.mount_row(1, node(1), 50));

    assert_eq!(list.row_height(1), Some(50));
    assert_eq!(list.row_top(1), Some(20));
    assert_eq!(list.row_top(2), Some(70));
    assert_eq!(list.total_height(), 20_030);

    let mut rows = Vec::new();
    list.collect_rows(&mut rows);
    assert_eq!(rows[0].top, 0);
    assert_eq!(rows[1].height, 50);
    assert_eq!(rows[2].top, 70);
    assert!(rows.iter().all(|r| r.min_height == 20));
    for pair in rows.windows(2) {
        assert_eq!(pair[0].bottom(), pair[1].top);
    }
}

#[test]
fn measurements_below_minimum_are_ignored() {
    let mut list = default_list();
    assert!(list.mount_row(0, node(0), 12));
    assert_eq!(list.heights().get(0), None);
    assert_eq!(list.row_height(0), Some(20));

    assert!(list.on_node_resize(&node(0), 35));
    assert_eq!(list.heights().get(0), Some(35));

    // An accepted value stays authoritative even after the minimum moves above it.
    list.set_min_row_height(40).unwrap();
    assert_eq!(list.row_height(0), Some(35));
}

#[test]
fn equal_measurements_do_not_bump_the_version() {
    let mut map = HeightMap::new();
    assert!(map.record(4, 30, 20));
    let v = map.version();
    assert!(!map.record(4, 30, 20));
    assert!(!map.replace(4, 30));
    assert_eq!(map.version(), v);
    assert!(map.replace(4, 31));
    assert_eq!(map.version(), v + 1);
    assert_eq!(map.remove(9), None);
    assert_eq!(map.version(), v + 1);
}

#[test]
fn rows_outside_the_window_lose_subscription_and_height() {
    let mut list = default_list();
    list.set_scroll_offset(2000);
    mount_range(&mut list, 20);
    let before = list.mounted_indexes();
    assert_eq!(before.len(), list.range().len());
    assert_eq!(list.heights().len(), before.len());

    list.set_scroll_offset(10_000);
    let range = list.range();
    assert!(list.mounted_indexes().iter().all(|&i| range.contains(i)));
    assert!(list.heights().indexes().iter().all(|&i| range.contains(i)));
    for i in before {
        assert!(!list.is_mounted(i));
        assert_eq!(list.heights().get(i), None);
        assert!(!list.observer().is_observing(&node(i)));
        assert!(!list.on_node_resize(&node(i), 99));
    }
    // Only the root is still observed.
    assert_eq!(list.observer().len(), 1);
}

#[test]
fn retained_heights_survive_eviction() {
    let mut list = attached(
        VirtualListOptions::new(20, 5).with_retain_offscreen_heights(true),
        1000,
    );
    list.set_scroll_offset(2000);
    mount_range(&mut list, 20);
    let before = list.mounted_indexes();

    list.set_scroll_offset(10_000);
    assert_eq!(list.mounted_len(), 0);
    for i in before {
        assert!(!list.is_mounted(i));
        assert_eq!(list.heights().get(i), Some(20));
    }
}

#[test]
fn mount_row_rejects_rows_outside_the_window() {
    let mut list = default_list();
    assert!(!list.mount_row(500, node(500), 20));
    assert!(!list.mount_row(5000, node(5000), 20));
    assert_eq!(list.mounted_len(), 0);
}

#[test]
fn remounting_a_row_swaps_observed_nodes() {
    let mut list = default_list();
    assert!(list.mount_row(0, 100, 20));
    assert!(!list.mount_row(0, 100, 20));
    assert!(list.mount_row(0, 101, 20));
    assert!(!list.observer().is_observing(&100));
    assert!(list.observer().is_observing(&101));
    assert_eq!(list.mounted_node(0), Some(&101));

    // A node reused for another row follows the new index.
    assert!(list.mount_row(1, 101, 20));
    assert!(!list.is_mounted(0));
    assert!(list.on_node_resize(&101, 44));
    assert_eq!(list.heights().get(1), Some(44));
    assert_eq!(list.heights().get(0), Some(20));
}

#[test]
fn root_resize_updates_viewport_and_buffer() {
    let mut list = default_list();
    assert!(list.on_node_resize(&ROOT, 500));
    assert_eq!(list.viewport_height(), 500);
    assert_eq!(list.buffer_size(), 25);
    // 26 rows reach past 500px, plus 25 buffer rows.
    assert_eq!(list.range().end_index, 51);
    assert_eq!(list.heights().len(), 0);
}

#[test]
fn batched_resizes_recompute_once() {
    let changes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&changes);
    let options = VirtualListOptions::new(20, 5).with_on_range_change(Some(move |_r: RowRange| {
        counter.fetch_add(1, Ordering::Relaxed);
    }));
    let mut list = attached(options, 1000);
    mount_range(&mut list, 20);
    let before = changes.load(Ordering::Relaxed);

    let (n0, n1, n2) = (node(0), node(1), node(2));
    list.on_resize([(&n0, 40), (&n1, 40), (&n2, 40)]);

    assert_eq!(changes.load(Ordering::Relaxed) - before, 1);
    // 10 rows reach past 250px (3 x 40 + 7 x 20).
    assert_eq!(list.range().end_index, 22);
    assert_eq!(list.mounted_len(), 22);
}

#[test]
fn throttle_releases_leading_and_trailing_values() {
    let mut t = Throttle::new(50);
    assert_eq!(t.call(1, 0), Some(1));
    assert_eq!(t.call(2, 10), None);
    assert_eq!(t.call(3, 20), None);
    assert!(t.has_pending());
    assert_eq!(t.poll(49), None);
    assert_eq!(t.poll(50), Some(3));
    assert_eq!(t.poll(200), None);
    assert_eq!(t.call(4, 60), None);
    // The window elapsed without a poll: the new value goes through, the stale one is dropped.
    assert_eq!(t.call(5, 120), Some(5));
    assert!(!t.has_pending());
}

#[test]
fn scroll_events_are_throttled_but_forwarded_raw() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let options = VirtualListOptions::new(20, 5)
        .with_on_scroll(Some(move |x: u64, y: u64| sink.lock().unwrap().push((x, y))));
    let mut list = attached(options, 1000);

    list.on_scroll_event(at(100), 0);
    assert_eq!(list.scroll_offset(), 100);
    list.on_scroll_event(ScrollMetrics { scroll_left: 7, ..at(200) }, 10);
    list.on_scroll_event(at(300), 20);
    assert_eq!(list.scroll_offset(), 100);
    assert!(list.has_pending_scroll());

    assert!(!list.tick(40));
    assert!(list.tick(50));
    assert_eq!(list.scroll_offset(), 300);
    assert!(!list.tick(500));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(0, 100), (7, 200), (0, 300)]
    );
}

#[test]
fn initial_request_is_issued_once_on_attach() {
    let (requests, sink) = recorder();
    let mut list = VirtualList::<u64>::new(
        VirtualListOptions::new(20, 5).with_on_data_request(Some(sink)),
    )
    .unwrap();
    list.set_items(0);
    assert_eq!(list.pending_requests(), 0);

    assert!(list.attach(ROOT, at(0)));
    assert!(!list.attach(ROOT, at(0)));
    assert_eq!(list.run_deferred(), 1);
    assert_eq!(list.run_deferred(), 0);
    assert_eq!(*requests.lock().unwrap(), vec![DataRequest::Initial]);
    assert!(DataRequest::Initial.is_initial());
}

#[test]
fn reaching_the_tail_requests_more_once_per_transition() {
    let (requests, sink) = recorder();
    let mut list = attached(
        VirtualListOptions::new(20, 5).with_on_data_request(Some(sink)),
        1000,
    );
    list.run_deferred();

    list.on_scroll_event(at(19_750), 0);
    assert_eq!(list.range().end_index, 1000);
    assert!(list.is_bottom_reached());
    // Deferred until the host drains the queue.
    assert_eq!(list.pending_requests(), 1);
    assert_eq!(requests.lock().unwrap().len(), 1);
    list.run_deferred();
    assert_eq!(
        *requests.lock().unwrap(),
        vec![DataRequest::Initial, DataRequest::More]
    );

    // Still at the bottom: no repeat.
    list.on_scroll_event(at(19_745), 100);
    list.run_deferred();
    assert_eq!(requests.lock().unwrap().len(), 2);

    // Leave and come back.
    list.on_scroll_event(at(10_000), 200);
    list.on_scroll_event(at(19_750), 300);
    list.run_deferred();
    assert_eq!(requests.lock().unwrap().len(), 3);
}

#[test]
fn loading_and_has_more_block_requests() {
    let (requests, sink) = recorder();
    let mut list = attached(
        VirtualListOptions::new(20, 5)
            .with_loading(true)
            .with_on_data_request(Some(sink)),
        1000,
    );
    list.on_scroll_event(at(19_750), 0);
    list.run_deferred();
    assert_eq!(*requests.lock().unwrap(), vec![DataRequest::Initial]);

    list.set_loading(false);
    list.set_has_more(false);
    list.on_scroll_event(at(19_745), 100);
    list.run_deferred();
    assert_eq!(requests.lock().unwrap().len(), 1);

    list.set_has_more(true);
    list.on_scroll_event(at(19_750), 200);
    list.run_deferred();
    assert_eq!(
        *requests.lock().unwrap(),
        vec![DataRequest::Initial, DataRequest::More]
    );
}

#[test]
fn new_items_suppress_the_next_request() {
    let (requests, sink) = recorder();
    let mut list = attached(
        VirtualListOptions::new(20, 5).with_on_data_request(Some(sink)),
        1000,
    );
    list.on_scroll_event(at(19_750), 0);
    list.run_deferred();
    assert_eq!(requests.lock().unwrap().len(), 2);

    list.set_items(1000);
    assert_eq!(list.pending_requests(), 0);

    list.on_scroll_event(at(19_745), 100);
    assert_eq!(list.pending_requests(), 1);
}

#[test]
fn refreshed_metrics_keep_a_grown_list_from_requesting() {
    let m = |scroll_top: u64, scroll_height: u64| ScrollMetrics {
        scroll_top,
        scroll_height,
        ..at(0)
    };
    let (requests, sink) = recorder();
    let mut list = attached(
        VirtualListOptions::new(20, 5).with_on_data_request(Some(sink)),
        20,
    );
    list.on_scroll_event(m(150, 400), 0);
    list.run_deferred();
    assert_eq!(requests.lock().unwrap().len(), 2);

    // A page arrived; the content grew and the user is 100px above the bottom.
    list.set_items(25);
    list.set_metrics(m(150, 500));
    assert!(!list.is_bottom_reached());
    assert_eq!(list.range().end_index, 25);
    assert!(list.mount_row(20, node(20), 25));
    assert_eq!(list.run_deferred(), 0);

    list.on_scroll_event(m(250, 500), 100);
    list.run_deferred();
    assert_eq!(
        *requests.lock().unwrap(),
        vec![DataRequest::Initial, DataRequest::More, DataRequest::More]
    );
}

#[test]
fn row_that_is_not_last_does_not_request_more() {
    let (requests, sink) = recorder();
    let mut list = attached(
        VirtualListOptions::new(20, 5).with_on_data_request(Some(sink)),
        1000,
    );
    // The container claims to be at its bottom, but the window is far from the tail.
    list.on_scroll_event(
        ScrollMetrics {
            scroll_height: 500,
            ..at(250)
        },
        0,
    );
    assert!(list.is_bottom_reached());
    list.run_deferred();
    assert_eq!(*requests.lock().unwrap(), vec![DataRequest::Initial]);
}

#[test]
fn bottom_detection_uses_threshold_and_scrollability() {
    let m = |top: u64, client: u32, height: u64| ScrollMetrics {
        scroll_top: top,
        client_height: client,
        scroll_height: height,
        ..ScrollMetrics::default()
    };
    assert!(!is_bottom_reached(&m(0, 300, 300), 10));
    assert!(!is_bottom_reached(&m(0, 400, 300), 10));
    assert!(is_bottom_reached(&m(691, 300, 1000), 10));
    assert!(!is_bottom_reached(&m(690, 300, 1000), 10));
    assert!(is_bottom_reached(&m(705, 300, 1000), 10));
}

#[test]
fn items_replacement_keeps_index_keyed_heights() {
    let mut list = default_list();
    assert!(list.mount_row(3, node(3), 33));

    list.set_items(1000);
    assert_eq!(list.heights().get(3), Some(33));

    list.set_items(2);
    assert_eq!(list.heights().get(3), None);
    assert!(!list.is_mounted(3));
    assert_eq!(list.range().end_index, 2);
    assert_eq!(list.total_height(), 40);
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum ObserverEvent {
    Observe(u64),
    Unobserve(u64),
    Disconnect,
}

struct Recording(Rc<RefCell<Vec<ObserverEvent>>>);

impl ObserverBackend<u64> for Recording {
    fn observe(&mut self, node: &u64) {
        self.0.borrow_mut().push(ObserverEvent::Observe(*node));
    }

    fn unobserve(&mut self, node: &u64) {
        self.0.borrow_mut().push(ObserverEvent::Unobserve(*node));
    }

    fn disconnect(&mut self) {
        self.0.borrow_mut().push(ObserverEvent::Disconnect);
    }
}

#[test]
fn backend_mirrors_subscriptions_and_detach_is_terminal() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let (requests, sink) = recorder();
    let mut list = VirtualList::<u64>::with_backend(
        VirtualListOptions::new(20, 5).with_on_data_request(Some(sink)),
        Box::new(Recording(Rc::clone(&events))),
    )
    .unwrap();
    list.set_items(1000);
    list.attach(ROOT, at(0));
    list.mount_row(0, node(0), 20);
    list.set_scroll_offset(10_000);

    assert_eq!(
        *events.borrow(),
        vec![
            ObserverEvent::Observe(ROOT),
            ObserverEvent::Observe(node(0)),
            ObserverEvent::Unobserve(node(0)),
        ]
    );

    list.detach();
    assert!(list.is_detached());
    assert_eq!(events.borrow().last(), Some(&ObserverEvent::Disconnect));
    assert!(list.observer().is_empty());
    assert_eq!(list.root(), None);

    let range = list.range();
    list.on_scroll_event(at(0), 1000);
    assert!(!list.on_node_resize(&ROOT, 900));
    assert!(!list.mount_row(range.start_index, node(range.start_index), 20));
    assert_eq!(list.range(), range);

    // The initial request was queued before detaching.
    assert_eq!(list.run_deferred(), 1);
    assert_eq!(*requests.lock().unwrap(), vec![DataRequest::Initial]);
}

#[test]
fn retargeted_node_ignores_its_stale_handle() {
    let mut observer = SizeObserver::<u64>::default();
    let first = observer.observe(&7, ObserveTarget::Row(1));
    let second = observer.observe(&7, ObserveTarget::Row(4));
    assert_eq!(observer.len(), 1);

    assert!(!observer.unobserve(first));
    assert_eq!(
        observer.resolve(&7, 30),
        Some(ResizeEntry {
            target: ObserveTarget::Row(4),
            height: 30,
        })
    );

    assert!(observer.unobserve(second));
    assert!(observer.is_empty());
    assert!(!observer.unobserve(second));
}

#[test]
fn options_are_validated() {
    assert_eq!(
        VirtualListOptions::new(0, 5).validate(),
        Err(OptionsError::ZeroMinRowHeight)
    );
    assert_eq!(
        VirtualListOptions::default()
            .with_bottom_threshold(0)
            .validate(),
        Err(OptionsError::ZeroBottomThreshold)
    );
    assert!(VirtualList::<u64>::new(VirtualListOptions::new(0, 5)).is_err());

    let mut list = default_list();
    assert_eq!(
        list.set_min_row_height(0),
        Err(OptionsError::ZeroMinRowHeight)
    );
    assert!(list.update_options(|o| o.bottom_threshold = 0).is_err());
    assert_eq!(list.options().bottom_threshold, DEFAULT_BOTTOM_THRESHOLD);

    list.update_options(|o| o.buffer_size = 40).unwrap();
    assert_eq!(list.buffer_size(), 40);
    assert_eq!(list.range().end_index, 13 + 40);
}

#[test]
fn state_snapshot_reflects_the_last_pass() {
    let mut list = default_list();
    list.set_scroll_offset(2000);
    let state = list.state();
    assert_eq!(state.scroll_offset, 2000);
    assert_eq!(state.viewport_height, 250);
    assert_eq!(state.buffer_size, 12);
    assert_eq!(state.range, list.range());
    assert_eq!(state.total_height, 20_000);
}

#[test]
fn subject_delivers_to_subscribers() {
    let subject = Subject::<u64>::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let s = Rc::clone(&seen);
    let sub = subject.subscribe(move |v| s.borrow_mut().push(*v));
    let s = Rc::clone(&seen);
    let once = subject.once(move |v| s.borrow_mut().push(*v + 100));
    assert_eq!(subject.listener_count(), 2);

    subject.next(1);
    assert!(!once.is_active());
    subject.next(2);
    assert!(sub.unsubscribe());
    assert!(!sub.unsubscribe());
    subject.next(3);

    assert_eq!(*seen.borrow(), vec![1, 101, 2]);
    assert_eq!(subject.listener_count(), 0);
}

#[test]
fn subject_tolerates_reentrant_listeners() {
    let subject = Subject::<u64>::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    // The second listener is removed by the first one before it sees the value.
    let victim: Rc<RefCell<Option<Subscription<u64>>>> = Rc::new(RefCell::new(None));
    let v = Rc::clone(&victim);
    let sub_clone = subject.clone();
    let s = Rc::clone(&seen);
    subject.subscribe(move |value| {
        s.borrow_mut().push(*value);
        if let Some(sub) = v.borrow_mut().take() {
            sub.unsubscribe();
        }
        if *value == 1 {
            // Emitting from inside a listener must not panic.
            sub_clone.next(2);
        }
    });
    let s = Rc::clone(&seen);
    *victim.borrow_mut() = Some(subject.subscribe(move |value| s.borrow_mut().push(*value + 10)));

    subject.next(1);
    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert_eq!(subject.listener_count(), 1);
}

#[test]
fn subscription_outliving_its_subject_is_inert() {
    let subject = Subject::<u64>::new();
    let sub = subject.subscribe(|_| {});
    drop(subject);
    assert!(!sub.is_active());
    assert!(!sub.unsubscribe());
}

#[test]
fn task_queue_runs_in_order() {
    let mut q = TaskQueue::new();
    q.defer(1);
    q.defer(2);
    let mut out = Vec::new();
    assert_eq!(q.drain(|t| out.push(t)), 2);
    assert_eq!(out, vec![1, 2]);
    assert!(q.is_empty());
}
