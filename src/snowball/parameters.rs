use crate::validators::Weight;

/// Snowball parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// Sample size.
    pub k: usize,
    /// Quorum threshold.
    pub alpha: usize,
    /// Confidence required to finalise an uncontested choice.
    pub beta_virtuous: usize,
    /// Confidence required to finalise a contested choice.
    pub beta_rogue: usize,
    /// Number of polls allowed to run at the same time.
    pub concurrent_repolls: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters { k: 20, alpha: 16, beta_virtuous: 15, beta_rogue: 20, concurrent_repolls: 4 }
    }
}

/// Every constraint a `Parameters` value failed to satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    violations: Vec<String>,
}

impl ConfigError {
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "invalid snowball parameters:")?;
        for violation in self.violations.iter() {
            write!(f, "\n  {}", violation)?;
        }
        Ok(())
    }
}

impl Parameters {
    /// Checks the parameters against the constraints the sampling protocol needs to be
    /// safe and live. All constraints are checked so that the report lists every
    /// violation at once.
    pub fn valid(&self) -> Result<(), ConfigError> {
        let mut violations = vec![];
        if self.k == 0 {
            violations.push(format!("k = {}: fails the condition that: 0 < k", self.k));
        }
        if self.alpha == 0 {
            violations.push(format!("alpha = {}: fails the condition that: 0 < alpha", self.alpha));
        }
        if self.alpha > self.k {
            violations.push(format!(
                "k = {}, alpha = {}: fails the condition that: alpha <= k",
                self.k, self.alpha
            ));
        }
        if self.beta_virtuous == 0 {
            violations.push(format!(
                "beta_virtuous = {}: fails the condition that: 0 < beta_virtuous",
                self.beta_virtuous
            ));
        }
        if self.beta_rogue == 0 {
            violations.push(format!(
                "beta_rogue = {}: fails the condition that: 0 < beta_rogue",
                self.beta_rogue
            ));
        }
        if self.beta_virtuous > self.beta_rogue {
            violations.push(format!(
                "beta_virtuous = {}, beta_rogue = {}: fails the condition that: beta_virtuous <= beta_rogue",
                self.beta_virtuous, self.beta_rogue
            ));
        }
        if self.concurrent_repolls == 0 {
            violations.push(format!(
                "concurrent_repolls = {}: fails the condition that: 0 < concurrent_repolls",
                self.concurrent_repolls
            ));
        }
        if self.concurrent_repolls > self.beta_rogue {
            violations.push(format!(
                "concurrent_repolls = {}, beta_rogue = {}: fails the condition that: concurrent_repolls <= beta_rogue",
                self.concurrent_repolls, self.beta_rogue
            ));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError { violations })
        }
    }

    /// The stake weight a container needs in order to be accepted during bootstrap.
    pub fn alpha_weight(&self) -> Weight {
        self.alpha as Weight
    }
}
