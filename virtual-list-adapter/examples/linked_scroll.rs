// Example: a list container that follows a leader's horizontal scroll.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use virtual_list::{Subject, VirtualListOptions};
use virtual_list_adapter::{Controller, ScrollContainer};

#[derive(Default)]
struct Element {
    left: Cell<u64>,
    top: Cell<u64>,
    log: RefCell<Vec<String>>,
}

impl ScrollContainer for Element {
    fn scroll_left(&self) -> u64 {
        self.left.get()
    }

    fn scroll_top(&self) -> u64 {
        self.top.get()
    }

    fn scroll_width(&self) -> u64 {
        600
    }

    fn scroll_height(&self) -> u64 {
        20_000
    }

    fn client_height(&self) -> u32 {
        300
    }

    fn scroll_to(&self, x: u64, y: u64) {
        self.log.borrow_mut().push(format!("scroll_to({x}, {y})"));
        self.left.set(x);
        self.top.set(y);
    }
}

fn main() {
    let scroll_x = Subject::new();
    let element = Rc::new(Element::default());

    let mut c: Controller<Element> = Controller::mount(
        VirtualListOptions::new(20, 5),
        Rc::clone(&element),
        0,
        Some(&scroll_x),
    )
    .unwrap();
    c.set_items(1_000);

    // The leader publishes its offsets; the container follows (clamped to its width).
    for x in [40, 40, 900] {
        scroll_x.next(x);
    }

    c.scroll_to_row(200);
    c.on_scroll(0);
    println!("log={:?}", element.log.borrow());
    println!("state={:?}", c.list().state());

    c.unmount();
    scroll_x.next(10);
    println!("after unmount: listeners={}", scroll_x.listener_count());
}
