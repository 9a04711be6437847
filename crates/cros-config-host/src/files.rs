//! Install manifests derived from a single model record

use crate::model::ModelRecord;
use crate::types::{BaseFile, SymlinkedFile};

pub const CRAS_CONFIG_DIR: &str = "/etc/cras";
pub const UCM_CONFIG_DIR: &str = "/usr/share/alsa/ucm";
pub const LIB_FIRMWARE: &str = "/lib/firmware";
pub const TOUCH_FIRMWARE: &str = "/opt/google/touch/firmware";
pub const DPTF_DIR: &str = "/etc/dptf";

/// CRAS, UCM and topology files plus any explicit audio files.
pub fn audio_files(record: &ModelRecord) -> Vec<BaseFile> {
    let Some(main) = record.audio_main() else {
        return Vec::new();
    };
    let mut files = Vec::new();

    if let (Some(dir), Some(card)) = (&main.cras_config_dir, &main.card) {
        files.push(BaseFile::new(
            format!("cras-config/{dir}/dsp.ini"),
            format!("{CRAS_CONFIG_DIR}/{dir}/dsp.ini"),
        ));
        files.push(BaseFile::new(
            format!("cras-config/{dir}/{card}"),
            format!("{CRAS_CONFIG_DIR}/{dir}/{card}"),
        ));
    }

    if let Some(card) = &main.card {
        let ucm = match &main.ucm_suffix {
            Some(suffix) => format!("{card}.{suffix}"),
            None => card.clone(),
        };
        files.push(BaseFile::new(
            format!("ucm-config/{ucm}/HiFi.conf"),
            format!("{UCM_CONFIG_DIR}/{ucm}/HiFi.conf"),
        ));
        files.push(BaseFile::new(
            format!("ucm-config/{ucm}/{ucm}.conf"),
            format!("{UCM_CONFIG_DIR}/{ucm}/{ucm}.conf"),
        ));
    }

    if let Some(topology) = &main.topology_name {
        files.push(BaseFile::new(
            format!("topology/{topology}-tplg.bin"),
            format!("{LIB_FIRMWARE}/{topology}-tplg.bin"),
        ));
    }

    files.extend(
        main.files
            .iter()
            .map(|f| BaseFile::new(&f.source, &f.destination)),
    );
    files
}

pub fn touch_firmware_files(record: &ModelRecord) -> Vec<SymlinkedFile> {
    record
        .touch
        .values()
        .map(|device| {
            SymlinkedFile::new(
                &device.firmware_bin,
                format!("{TOUCH_FIRMWARE}/{}", device.firmware_bin),
                format!("{LIB_FIRMWARE}/{}", device.firmware_symlink),
            )
        })
        .collect()
}

pub fn thermal_files(record: &ModelRecord) -> Vec<BaseFile> {
    record
        .thermal
        .as_ref()
        .and_then(|t| t.dptf_dv.as_ref())
        .map(|dptf| vec![BaseFile::new(dptf, format!("{DPTF_DIR}/{dptf}"))])
        .unwrap_or_default()
}

pub fn arc_files(record: &ModelRecord) -> Vec<BaseFile> {
    let Some(arc) = &record.arc else {
        return Vec::new();
    };
    [&arc.hw_features, &arc.media_profiles]
        .into_iter()
        .flatten()
        .map(|f| BaseFile::new(&f.source, &f.destination))
        .collect()
}

/// Sort by destination, then source, and drop exact duplicates.
pub fn sort_base_files(mut files: Vec<BaseFile>) -> Vec<BaseFile> {
    files.sort_by(|a, b| (&a.dest, &a.source).cmp(&(&b.dest, &b.source)));
    files.dedup();
    files
}

/// Sort by destination, source and symlink, and drop exact duplicates.
pub fn sort_symlinked_files(mut files: Vec<SymlinkedFile>) -> Vec<SymlinkedFile> {
    files.sort_by(|a, b| {
        (&a.dest, &a.source, &a.symlink).cmp(&(&b.dest, &b.source, &b.symlink))
    });
    files.dedup();
    files
}
