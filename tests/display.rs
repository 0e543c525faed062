use pretty_assertions::assert_eq;

use cwsend::display::display_slices;

#[test]
fn slices_split_a_message_at_the_char_offset() {
    let slices = display_slices("CQ CQ", 3);
    assert_eq!(slices.display_message, "CQ CQ");
    assert_eq!(slices.done_text, "CQ ");
    assert_eq!(slices.remaining_text, "CQ");
}

#[test]
fn offset_zero_leaves_everything_remaining() {
    let slices = display_slices("TEST", 0);
    assert_eq!(slices.done_text, "");
    assert_eq!(slices.remaining_text, "TEST");
}

#[test]
fn offset_past_the_end_is_clamped() {
    let slices = display_slices("HI", 10);
    assert_eq!(slices.done_text, "HI");
    assert_eq!(slices.remaining_text, "");
}

#[test]
fn empty_message_yields_empty_slices() {
    let slices = display_slices("", 4);
    assert_eq!(slices.display_message, "");
    assert_eq!(slices.done_text, "");
    assert_eq!(slices.remaining_text, "");
}
