mod file_output;

use anyhow::Result;
pub use file_output::FileOutput;
use raycast::renderer::RenderOutput;

pub trait FinalOutput: Send {
    fn commit(&self, output: &RenderOutput) -> Result<()>;
}
