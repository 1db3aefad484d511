use std::io::Cursor;

use tracing::{instrument, trace};

use crate::{DnsError, Flags, Header, Networkable, Question, ResourceRecord};

#[derive(Debug, Default)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Default::default()
        }
    }

    /// A recursive query for a single question.
    pub fn query(id: u16, question: Question) -> Self {
        let mut flags = Flags::default();
        flags.set_rd(true);

        let mut message = Self::new(Header::new(id, flags));
        message.add_question(question);

        message
    }

    pub fn add_question(&mut self, question: Question) {
        self.header.num_questions += 1;
        self.questions.push(question)
    }
}

impl Networkable for Message {
    /// Queries carry only a header and questions; records are never
    /// serialized.
    #[instrument(level = "trace", skip_all)]
    fn to_bytes(&self) -> Vec<u8> {
        let mut ret = self.header.to_bytes();

        for question in self.questions.iter() {
            ret.extend_from_slice(&question.to_bytes());
        }

        ret
    }

    #[instrument(level = "trace", skip_all)]
    fn from_bytes(bytes: &mut Cursor<&[u8]>) -> Result<Self, DnsError> {
        let header = Header::from_bytes(bytes)?;

        trace!("parsing {} questions", header.num_questions);
        let mut questions = Vec::new();
        for _ in 0..header.num_questions {
            questions.push(Question::from_bytes(bytes)?);
        }

        trace!("parsing {} answers", header.num_answers);
        let mut answers = Vec::new();
        for _ in 0..header.num_answers {
            answers.push(ResourceRecord::from_bytes(bytes)?);
        }

        trace!("parsing {} authorities", header.num_authorities);
        let mut authorities = Vec::new();
        for _ in 0..header.num_authorities {
            authorities.push(ResourceRecord::from_bytes(bytes)?);
        }

        trace!("parsing {} additionals", header.num_additionals);
        let mut additionals = Vec::new();
        for _ in 0..header.num_additionals {
            additionals.push(ResourceRecord::from_bytes(bytes)?);
        }

        Ok(Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }
}
