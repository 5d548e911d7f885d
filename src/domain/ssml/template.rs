//! SSML 模板
//!
//! 自定义模板在构造时解析一次，每次合成时复制事件序列并把 `<slot/>`
//! 替换为转义后的文本。没有 slot 元素的模板使用 `{text}` 占位符。

use quick_xml::escape::escape;
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};

use super::SsmlError;
use crate::domain::voice::VoiceConfig;

const SLOT_ELEMENT: &[u8] = b"slot";
const TEXT_PLACEHOLDER: &str = "{text}";

/// 已解析的自定义模板
#[derive(Debug, Clone)]
pub enum SsmlTemplate {
    /// 含 `<slot/>` 的模板：slot 已从事件序列中移除，`slot_index` 为插入位置
    Slotted {
        events: Vec<Event<'static>>,
        slot_index: usize,
    },
    /// 无 slot 元素，整段文本做 `{text}` 替换
    RawText(String),
}

impl SsmlTemplate {
    pub fn parse(template: &str) -> Result<Self, SsmlError> {
        let mut reader = Reader::from_str(template);

        let mut events = Vec::new();
        let mut slots = Vec::new();
        let mut depth = 0usize;
        let mut roots = 0usize;
        // 处于 <slot>...</slot> 内部时的嵌套深度
        let mut slot_depth: Option<usize> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| SsmlError::InvalidTemplate(e.to_string()))?;

            match &event {
                Event::Eof => break,
                Event::Start(start) => {
                    if depth == 0 {
                        roots += 1;
                    }
                    depth += 1;
                    if let Some(inner) = slot_depth.as_mut() {
                        *inner += 1;
                        continue;
                    }
                    if start.name().as_ref() == SLOT_ELEMENT {
                        slots.push(events.len());
                        slot_depth = Some(1);
                        continue;
                    }
                }
                Event::End(_) => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        SsmlError::InvalidTemplate("unexpected closing tag".to_string())
                    })?;
                    if let Some(inner) = slot_depth.as_mut() {
                        *inner -= 1;
                        if *inner == 0 {
                            slot_depth = None;
                        }
                        continue;
                    }
                }
                Event::Empty(empty) => {
                    if depth == 0 {
                        roots += 1;
                    }
                    if slot_depth.is_some() {
                        continue;
                    }
                    if empty.name().as_ref() == SLOT_ELEMENT {
                        slots.push(events.len());
                        continue;
                    }
                }
                _ => {
                    if slot_depth.is_some() {
                        continue;
                    }
                }
            }

            events.push(event.into_owned());
        }

        if depth != 0 {
            return Err(SsmlError::InvalidTemplate(
                "unclosed element at end of template".to_string(),
            ));
        }
        if roots == 0 {
            return Err(SsmlError::InvalidTemplate("no root element".to_string()));
        }

        match slots.len() {
            1 => Ok(Self::Slotted {
                events,
                slot_index: slots[0],
            }),
            0 if template.contains(TEXT_PLACEHOLDER) => Ok(Self::RawText(template.to_string())),
            0 => Err(SsmlError::NoSubstitutionPoint),
            n => Err(SsmlError::MultipleSlots(n)),
        }
    }

    pub fn render(&self, text: &str) -> Result<String, SsmlError> {
        match self {
            Self::Slotted { events, slot_index } => {
                let mut writer = Writer::new(Vec::new());
                for (index, event) in events.iter().enumerate() {
                    if index == *slot_index {
                        write_text(&mut writer, text)?;
                    }
                    writer
                        .write_event(event.clone())
                        .map_err(|e| SsmlError::Render(e.to_string()))?;
                }
                if *slot_index == events.len() {
                    write_text(&mut writer, text)?;
                }
                String::from_utf8(writer.into_inner())
                    .map_err(|e| SsmlError::Render(e.to_string()))
            }
            Self::RawText(template) => Ok(template.replace(TEXT_PLACEHOLDER, &escape(text))),
        }
    }
}

fn write_text(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), SsmlError> {
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| SsmlError::Render(e.to_string()))
}

/// SSML 构建器
///
/// 未提供自定义模板时，用音色参数拼出固定结构：
/// `<speak>` -> `<voice>` -> `<mstts:express-as>` -> `<prosody>`
#[derive(Debug, Clone)]
pub enum SsmlBuilder {
    Default { prefix: String, suffix: String },
    Custom(SsmlTemplate),
}

impl SsmlBuilder {
    pub fn from_voice(voice: &VoiceConfig) -> Self {
        let prefix = format!(
            "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' \
             xmlns:mstts='http://www.w3.org/2001/mstts' xml:lang='{}'>\
             <voice name='{}'>\
             <mstts:express-as style='{}' role='{}'>\
             <prosody rate='{}' volume='{}'>",
            escape(voice.locale()),
            escape(voice.voice()),
            escape(voice.style()),
            escape(voice.role()),
            escape(voice.rate()),
            escape(voice.volume()),
        );
        let suffix = "</prosody></mstts:express-as></voice></speak>".to_string();
        Self::Default { prefix, suffix }
    }

    /// 优先使用自定义模板
    pub fn new(voice: &VoiceConfig, template: Option<&str>) -> Result<Self, SsmlError> {
        match template {
            Some(template) => SsmlTemplate::parse(template).map(Self::Custom),
            None => Ok(Self::from_voice(voice)),
        }
    }

    pub fn render(&self, text: &str) -> Result<String, SsmlError> {
        match self {
            Self::Default { prefix, suffix } => {
                Ok(format!("{}{}{}", prefix, escape(text), suffix))
            }
            Self::Custom(template) => template.render(text),
        }
    }
}
