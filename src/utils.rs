/// Stack that must be left before recursing into another node.
const RED_ZONE: usize = 256 * 1024;
/// Size of each extra stack segment once the red zone is reached.
const STACK_SEGMENT: usize = 4 * 1024 * 1024;

/// Run `f` on the current stack, or on a fresh segment when the current one
/// is nearly used up. The parser and the interpreter recurse once per level
/// of nesting, so every recursive step goes through here.
pub(crate) fn grow_stack<R>(f: impl FnOnce() -> R) -> R { stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f) }
