/// Receives solver events and decides how the iteration should proceed.
///
/// Observers let callers watch a method run step by step (to animate a plot,
/// print a table row, or stop a demonstration after a few iterations) without
/// changing the solver API.
///
/// `observe` returns `Option<A>`: `Some(action)` requests a solver-specific
/// action and `None` lets the solver continue unchanged.
///
/// Closures implement `Observer` automatically, and `()` is a no-op observer.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<Obs: Observer<usize, &'static str>>(mut observer: Obs, events: usize) -> Vec<&'static str> {
        (0..events).filter_map(|e| observer.observe(&e)).collect()
    }

    #[test]
    fn unit_observer_never_acts() {
        assert!(drive((), 5).is_empty());
    }

    #[test]
    fn closure_observer_sees_every_event() {
        let mut seen = Vec::new();
        let actions = drive(
            |e: &usize| {
                seen.push(*e);
                (*e == 3).then_some("stop")
            },
            5,
        );

        assert_eq!(seen, [0, 1, 2, 3, 4]);
        assert_eq!(actions, ["stop"]);
    }
}
