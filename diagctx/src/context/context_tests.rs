//! Stack behavior tests across frames.

#[cfg(test)]
mod tests {
    use crate::config::RenderConfig;
    use crate::context::{Cause, ErrorContext, Frame};
    use pretty_assertions::assert_eq;

    fn describe(frame: &Frame) -> String {
        frame.render_with(&RenderConfig::new().with_line_separator("\n"))
    }

    #[test]
    fn test_store_recall_symmetry() {
        for n in 0..8 {
            let mut ctx = ErrorContext::new();
            ctx.current_mut()
                .message("Error updating database")
                .resource("OrderMapper.xml")
                .sql("UPDATE orders SET state = ?");
            let before = describe(ctx.current());

            for level in 0..n {
                ctx.store().activity(format!("level {level}"));
            }
            assert_eq!(ctx.depth(), n);
            for _ in 0..n {
                ctx.recall();
            }

            assert_eq!(ctx.depth(), 0);
            assert_eq!(describe(ctx.current()), before);
        }
    }

    #[test]
    fn test_inner_mutation_does_not_touch_outer() {
        let mut ctx = ErrorContext::new();
        ctx.current_mut().object("UserMapper.selectById");
        ctx.store().activity("setting parameters").cause("bad parameter");
        ctx.recall();

        assert_eq!(
            describe(ctx.current()),
            "\n### The error may involve UserMapper.selectById"
        );
    }

    #[test]
    fn test_each_level_keeps_its_own_fields() {
        let mut ctx = ErrorContext::new();
        ctx.current_mut().resource("a.xml");
        ctx.store().resource("b.xml");
        ctx.store().resource("c.xml");

        let suspended: Vec<_> = ctx.frames().iter().map(|f| f.get_resource()).collect();
        assert_eq!(suspended, vec![Some("a.xml"), Some("b.xml")]);
        assert_eq!(ctx.recall().get_resource(), Some("b.xml"));
        assert_eq!(ctx.recall().get_resource(), Some("a.xml"));
        assert_eq!(ctx.recall().get_resource(), Some("a.xml"));
    }

    #[test]
    fn test_reset_after_nested_failure() {
        let mut ctx = ErrorContext::new();
        ctx.current_mut().message("outer");
        ctx.store().cause(Cause::from_message("inner failure"));

        ctx.reset();
        assert_eq!(ctx.depth(), 0);
        assert_eq!(describe(ctx.current()), "");
    }
}
