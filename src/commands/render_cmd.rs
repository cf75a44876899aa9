use async_trait::async_trait;
use crate::commands::cat::image_markup;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{FileType, Node};

pub struct RenderCommand;

#[async_trait]
impl Command for RenderCommand {
    fn name(&self) -> &'static str {
        "render"
    }

    fn description(&self) -> &'static str {
        "Render an image file"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let Some(target) = ctx.args.first() else {
            return CommandResult::error("Usage: render <file>\n".to_string());
        };
        let session = ctx.session;
        match session.vfs.resolve(target) {
            Some(Node::File(f)) if f.file_type == FileType::Image => {
                let html = image_markup(f);
                session.out.markup(html);
                CommandResult::success(String::new())
            }
            _ => CommandResult::error(format!("render: {}: File not found or not an image\n", target)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cat::CatCommand;
    use crate::commands::testing::Harness;
    use crate::output::OutputLine;

    #[tokio::test]
    async fn test_render_image_matches_cat() {
        let mut h = Harness::new();
        h.session.vfs.write_file("logo.png", "img/logo.png", FileType::Image, true).unwrap();
        let result = h.run(&RenderCommand, &["logo.png"]).await;
        assert_eq!(result.exit_code, 0);
        let rendered = h.sink.take();
        assert_eq!(rendered, vec![OutputLine::Markup("<img src=\"img/logo.png\" alt=\"logo.png\">".into())]);

        h.run(&CatCommand, &["logo.png"]).await;
        assert_eq!(h.sink.take(), rendered);
    }

    #[tokio::test]
    async fn test_render_rejects_non_images() {
        let mut h = Harness::new();
        let result = h.run(&RenderCommand, &["/etc/motd"]).await;
        assert_eq!(result.stderr, "render: /etc/motd: File not found or not an image\n");
        assert_eq!(result.exit_code, 1);
        assert!(h.sink.lines().is_empty());

        let result = h.run(&RenderCommand, &[]).await;
        assert_eq!(result.stderr, "Usage: render <file>\n");
    }
}
