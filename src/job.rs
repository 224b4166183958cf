use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::algo::mcf::{McfFirstPass, McfSecondPass};
use crate::component::LinkGraphComponent;
use crate::demands::DemandCalculator;
use crate::error::Error;
use crate::ComponentHandler;

/// A component together with the handlers to run over it, in order.
pub struct LinkGraphJob {
    component: LinkGraphComponent,
    handlers: Vec<Box<dyn ComponentHandler>>,
}

impl LinkGraphJob {
    pub fn new(component: LinkGraphComponent) -> Self {
        Self {
            component,
            handlers: Vec::new(),
        }
    }

    /// Demand calculation followed by both flow passes.
    pub fn with_default_handlers(component: LinkGraphComponent) -> Self {
        let mut job = Self::new(component);
        job.add_handler(DemandCalculator);
        job.add_handler(McfFirstPass);
        job.add_handler(McfSecondPass);
        job
    }

    pub fn add_handler(&mut self, handler: impl ComponentHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn component(&self) -> &LinkGraphComponent {
        &self.component
    }

    pub fn run(&mut self) -> Result<(), Error> {
        for handler in &mut self.handlers {
            handler.run(&mut self.component)?;
        }
        Ok(())
    }

    pub fn into_component(self) -> LinkGraphComponent {
        self.component
    }
}
