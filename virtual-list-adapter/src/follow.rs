use alloc::rc::Rc;

use virtual_list::{Subject, Subscription};

use crate::ScrollContainer;

/// Makes `container` follow the horizontal offsets published on `subject`.
///
/// Each emitted `x` that differs from the container's `scroll_left` scrolls the container to
/// `min(x, scroll_width)`, keeping its vertical offset. The relationship is one-way: nothing
/// here publishes the container's own horizontal scroll.
///
/// The returned subscription stays active until it is unsubscribed.
pub fn follow_scroll_x<C>(subject: &Subject<u64>, container: Rc<C>) -> Subscription<u64>
where
    C: ScrollContainer + 'static,
{
    subject.subscribe(move |&x| {
        if container.scroll_left() == x {
            return;
        }
        let target = x.min(container.scroll_width());
        vtrace!(x, target, "following horizontal scroll");
        container.scroll_to(target, container.scroll_top());
    })
}
