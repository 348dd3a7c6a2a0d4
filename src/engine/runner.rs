//! Drives an [`App`] through init -> update* -> shutdown

use super::{App, Engine, EngineError};

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Running,
    Stopped,
}

/// Owns the app and its engine for one session.
///
/// `shutdown` runs exactly once after a successful `init`, whether the session
/// ends through `stop` or by dropping the runner.
pub struct Runner<A: App> {
    app: A,
    engine: Engine,
    stage: Stage,
    frames: u64,
}

impl<A: App> Runner<A> {
    pub fn new(app: A, engine: Engine) -> Self {
        Self {
            app,
            engine,
            stage: Stage::Idle,
            frames: 0,
        }
    }

    /// Run `init`. Calling again after the first time is a no-op.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.stage != Stage::Idle {
            return Ok(());
        }

        match self.app.init(&mut self.engine) {
            Ok(()) => {
                self.stage = Stage::Running;
                log::info!("App initialized");
                Ok(())
            }
            Err(e) => {
                self.stage = Stage::Stopped;
                Err(e)
            }
        }
    }

    /// Run one update and reset per-frame input
    pub fn frame(&mut self) -> ControlFlow {
        if self.stage != Stage::Running || self.engine.quit_requested() {
            return ControlFlow::Exit;
        }

        self.app.update(&mut self.engine);
        self.engine.input.end_frame();
        self.frames += 1;

        if self.engine.quit_requested() {
            ControlFlow::Exit
        } else {
            ControlFlow::Continue
        }
    }

    /// Run `shutdown` if the app is running
    pub fn stop(&mut self) {
        if self.stage == Stage::Running {
            self.app.shutdown(&mut self.engine);
            log::info!("App shut down after {} frames", self.frames);
        }
        self.stage = Stage::Stopped;
    }

    pub fn is_running(&self) -> bool {
        self.stage == Stage::Running
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }
}

impl<A: App> Drop for Runner<A> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::engine::{AppDesc, Key, MemorySource};

    #[derive(Debug, Default)]
    struct Calls {
        init: u32,
        update: u32,
        shutdown: u32,
    }

    struct Counting {
        calls: Rc<RefCell<Calls>>,
        fail_init: bool,
    }

    impl App for Counting {
        fn init(&mut self, _engine: &mut Engine) -> Result<(), EngineError> {
            self.calls.borrow_mut().init += 1;
            if self.fail_init {
                return Err(EngineError::AssetNotFound {
                    path: "missing.ttf".to_string(),
                });
            }
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine) {
            self.calls.borrow_mut().update += 1;
            if engine.key_pressed(Key::Escape) {
                engine.quit();
            }
        }

        fn shutdown(&mut self, _engine: &mut Engine) {
            self.calls.borrow_mut().shutdown += 1;
        }
    }

    fn runner(fail_init: bool) -> (Runner<Counting>, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let app = Counting {
            calls: calls.clone(),
            fail_init,
        };
        let engine = Engine::new(AppDesc::default().window_size(), MemorySource::new());
        (Runner::new(app, engine), calls)
    }

    #[test]
    fn test_lifecycle_order() {
        let (mut runner, calls) = runner(false);
        runner.start().unwrap();
        runner.start().unwrap();
        assert_eq!(runner.frame(), ControlFlow::Continue);
        assert_eq!(runner.frame(), ControlFlow::Continue);
        runner.stop();
        runner.stop();

        let calls = calls.borrow();
        assert_eq!(calls.init, 1);
        assert_eq!(calls.update, 2);
        assert_eq!(calls.shutdown, 1);
    }

    #[test]
    fn test_quit_key_exits() {
        let (mut runner, calls) = runner(false);
        runner.start().unwrap();
        runner.engine_mut().input.press(Key::Escape);
        assert_eq!(runner.frame(), ControlFlow::Exit);
        assert!(!runner.engine().key_pressed(Key::Escape));

        drop(runner);
        assert_eq!(calls.borrow().shutdown, 1);
    }

    #[test]
    fn test_no_update_after_quit() {
        let (mut runner, calls) = runner(false);
        runner.start().unwrap();
        runner.engine_mut().input.press(Key::Escape);
        assert_eq!(runner.frame(), ControlFlow::Exit);
        assert_eq!(runner.frame(), ControlFlow::Exit);
        assert_eq!(calls.borrow().update, 1);
        assert!(runner.is_running());
    }

    #[test]
    fn test_drop_runs_shutdown() {
        let (mut runner, calls) = runner(false);
        runner.start().unwrap();
        runner.frame();
        drop(runner);
        assert_eq!(calls.borrow().shutdown, 1);
    }

    #[test]
    fn test_failed_init_never_updates() {
        let (mut runner, calls) = runner(true);
        assert!(runner.start().is_err());
        assert_eq!(runner.frame(), ControlFlow::Exit);
        assert!(!runner.is_running());
        drop(runner);

        let calls = calls.borrow();
        assert_eq!(calls.update, 0);
        assert_eq!(calls.shutdown, 0);
    }
}
