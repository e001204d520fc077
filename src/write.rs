use crate::data::GraphModel;

/// JSON exporter for a `GraphModel`
pub fn write_graph<W: std::io::Write>(
    mut writer: W,
    graph: &GraphModel,
) -> Result<(), anyhow::Error> {
    serde_json::to_writer_pretty(&mut writer, graph)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
