use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::config::{MethodConfig, Visibility};
use crate::error::Error;
use crate::rng::{RandomSource, Xoshiro256StarStar};
use crate::runtime::{GeneratedClass, MethodSpec};

/// A declarative configuration session for one throwaway class.
///
/// Declarations accumulate through the five visibility verbs; `build()`
/// materializes them into a fresh [`GeneratedClass`]. A generator is not
/// safe for concurrent use.
#[derive(Default)]
pub struct Generator {
    instance_methods: Vec<MethodConfig>,
    class_methods: Vec<MethodConfig>,
}

impl Generator {
    pub fn new() -> Generator {
        Generator::default()
    }

    /// Declare a public instance method.
    pub fn public_method<F>(&mut self, name: &str, configure: F) -> Result<(), Error>
    where
        F: FnOnce(&mut MethodConfig) -> Result<(), Error>,
    {
        self.declare(name, Visibility::Public, configure)
    }

    /// Declare a private instance method.
    pub fn private_method<F>(&mut self, name: &str, configure: F) -> Result<(), Error>
    where
        F: FnOnce(&mut MethodConfig) -> Result<(), Error>,
    {
        self.declare(name, Visibility::Private, configure)
    }

    /// Declare a protected instance method.
    pub fn protected_method<F>(&mut self, name: &str, configure: F) -> Result<(), Error>
    where
        F: FnOnce(&mut MethodConfig) -> Result<(), Error>,
    {
        self.declare(name, Visibility::Protected, configure)
    }

    /// Declare a public class-level method.
    pub fn public_class_method<F>(&mut self, name: &str, configure: F) -> Result<(), Error>
    where
        F: FnOnce(&mut MethodConfig) -> Result<(), Error>,
    {
        self.declare(name, Visibility::PublicClass, configure)
    }

    /// Declare a private class-level method.
    pub fn private_class_method<F>(&mut self, name: &str, configure: F) -> Result<(), Error>
    where
        F: FnOnce(&mut MethodConfig) -> Result<(), Error>,
    {
        self.declare(name, Visibility::PrivateClass, configure)
    }

    /// Declarations recorded so far, instance-level then class-level.
    pub fn declared(&self) -> (&[MethodConfig], &[MethodConfig]) {
        (&self.instance_methods, &self.class_methods)
    }

    /// Materialize a brand-new class from the recorded declarations, with a
    /// time-seeded random source. May be called repeatedly; every call
    /// yields an independent class identity. Declarations stay open after a
    /// build — later declarations only affect later builds.
    pub fn build(&self) -> GeneratedClass {
        self.build_with_rng(Rc::new(RefCell::new(Xoshiro256StarStar::from_time())))
    }

    /// Materialize with an injected random source, for deterministic tests.
    pub fn build_with_rng(&self, rng: Rc<RefCell<dyn RandomSource>>) -> GeneratedClass {
        let instance = materialize(&self.instance_methods);
        let class = materialize(&self.class_methods);
        let built = GeneratedClass::from_parts(None, instance, class, rng);
        debug!(
            class_id = built.id(),
            instance_methods = self.instance_methods.len(),
            class_methods = self.class_methods.len(),
            "materialized generated class"
        );
        built
    }

    fn declare<F>(&mut self, name: &str, visibility: Visibility, configure: F) -> Result<(), Error>
    where
        F: FnOnce(&mut MethodConfig) -> Result<(), Error>,
    {
        let mut config = MethodConfig::new(name, visibility)?;
        configure(&mut config)?;
        if visibility.is_class_level() {
            self.class_methods.push(config);
        } else {
            self.instance_methods.push(config);
        }
        Ok(())
    }
}

fn materialize(configs: &[MethodConfig]) -> HashMap<String, MethodSpec> {
    let mut table = HashMap::new();
    for config in configs {
        // A re-declared name replaces the earlier declaration, the way a
        // later `def` overrides an earlier one.
        table.insert(
            config.name().to_string(),
            MethodSpec {
                visibility: config.visibility(),
                params: config.params().to_vec(),
                return_value: config.return_value().cloned(),
                generate_random: config.generate_random(),
            },
        );
    }
    table
}

/// Entry point: open a configuration session, run the supplied callback
/// against it, and return the built class.
pub fn generate<F>(configure: F) -> Result<GeneratedClass, Error>
where
    F: FnOnce(&mut Generator) -> Result<(), Error>,
{
    let mut generator = Generator::new();
    configure(&mut generator)?;
    Ok(generator.build())
}
