//! The main message pump.
//!
//! One loop owns the thread: it polls the input driver, hands events to the
//! handler, and calls the handler with `None` once per poll interval so the
//! application can pump its cooperative timers and redraw. Hover deadlines,
//! notice expiry, and the deferred edit focus all advance on that `None`
//! tick — there are no background threads and no timer callbacks outside
//! this loop, which is what makes cancellation race-free.

use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

pub struct EventLoop<D> {
    driver: D,
    tick_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, tick_interval: Duration) -> Self {
        Self {
            driver,
            tick_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Run until the handler asks to quit.
    ///
    /// The handler receives `Some(event)` for input and `None` for a tick.
    /// After an event arrives the queue is drained before the next tick, so
    /// a fast drag never backs up behind rendering.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                return Ok(());
            }
            if !self.driver.poll(self.tick_interval)? {
                continue;
            }
            loop {
                let event = self.driver.read()?;
                if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                    return Ok(());
                }
                if !self.driver.poll(Duration::ZERO)? {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct QueueDriver {
        queue: VecDeque<Event>,
    }

    impl InputDriver for QueueDriver {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.queue.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.queue
                .pop_front()
                .ok_or_else(|| io::Error::other("queue empty"))
        }
    }

    #[test]
    fn drains_queued_events_between_ticks() {
        let queue: VecDeque<Event> = ('a'..='c')
            .map(|c| Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
            .collect();
        let mut event_loop = EventLoop::new(QueueDriver { queue }, Duration::ZERO);

        let mut ticks = 0;
        let mut seen = Vec::new();
        event_loop
            .run(|_, event| match event {
                Some(Event::Key(key)) => {
                    seen.push(key.code);
                    Ok(ControlFlow::Continue)
                }
                Some(_) => Ok(ControlFlow::Continue),
                None => {
                    ticks += 1;
                    // first tick happens before any event; quit on the second
                    if ticks > 1 {
                        Ok(ControlFlow::Quit)
                    } else {
                        Ok(ControlFlow::Continue)
                    }
                }
            })
            .unwrap();

        assert_eq!(
            seen,
            vec![KeyCode::Char('a'), KeyCode::Char('b'), KeyCode::Char('c')]
        );
        assert_eq!(ticks, 2);
    }
}
